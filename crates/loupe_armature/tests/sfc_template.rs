use loupe_armature::{parse_sfc, parse_template, ParseError};
use loupe_relief::{ElementType, LineIndex};

const SFC: &str = r#"<template>
  <div id="app">
    <TheButton :label="msg" @click="go" />
    <the-list>
      <template #item="{ row }">
        <component is="TheCell" />
      </template>
    </the-list>
  </div>
</template>

<script>
export default {
  components: { TheButton }
}
</script>
"#;

#[test]
fn template_positions_are_file_relative() {
    let descriptor = parse_sfc(SFC).unwrap();
    let template = descriptor.template.as_ref().unwrap();
    let index = LineIndex::new(SFC);

    let (root, errors) = parse_template(template.content, template.start, &index);
    assert!(errors.is_empty());

    let tags: Vec<_> = root.elements().map(|e| e.tag.as_str()).collect();
    assert_eq!(
        tags,
        vec!["div", "TheButton", "the-list", "template", "component"]
    );

    let button = root.elements().nth(1).unwrap();
    assert_eq!(button.loc.start.line, 3);
    assert_eq!(button.loc.start.column, 5);
    assert_eq!(button.tag_type, ElementType::Component);

    let slot_template = root.elements().nth(3).unwrap();
    assert_eq!(slot_template.tag_type, ElementType::Template);

    let dynamic = root.elements().nth(4).unwrap();
    let is = dynamic.attribute("is").unwrap();
    assert_eq!(is.value.as_ref().unwrap().content.as_str(), "TheCell");
    assert_eq!(is.loc.start.line, 6);
}

#[test]
fn script_block_is_sliced_from_source() {
    let descriptor = parse_sfc(SFC).unwrap();
    let script = descriptor.script.unwrap();
    assert!(script.content.contains("components: { TheButton }"));
    assert_eq!(
        &SFC[script.start as usize..script.end as usize],
        script.content
    );
}

#[test]
fn malformed_template_recovers() {
    let source = "<template><div><TheButton></div></template>";
    let descriptor = parse_sfc(source).unwrap();
    let template = descriptor.template.unwrap();
    let index = LineIndex::new(source);

    let (root, errors) = parse_template(template.content, template.start, &index);
    assert_eq!(
        errors,
        vec![ParseError::MissingEndTag {
            tag: "TheButton".into(),
            offset: 15,
        }]
    );
    assert_eq!(root.elements().count(), 2);
}
