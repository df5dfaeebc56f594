//! End-to-end tests for `vue/no-unused-components`.

use loupe_patina::{
    format_results, lint, LintConfig, LintResult, Linter, OutputFormat, Severity,
};

fn sfc_with_template(template_body: &str) -> String {
    format!(
        r#"<template>
        <div>
          {template_body}
        </div>
      </template>
      <script>
        export default {{
          components: {{
            TheButton
          }}
        }}
      </script>"#
    )
}

fn messages(result: &LintResult) -> Vec<(&str, u32)> {
    result
        .diagnostics
        .iter()
        .map(|d| (d.message.as_str(), d.line))
        .collect()
}

fn assert_valid(source: &str) {
    let result = lint(source, "test.vue");
    assert!(
        !result.has_diagnostics(),
        "expected no diagnostics for:\n{source}\ngot: {:?}",
        messages(&result)
    );
}

#[test]
fn template_without_script() {
    assert_valid("<template><div>Lorem ipsum</div></template>");
    assert_valid(
        r#"<template>
        <div>
          <h2>Lorem ipsum</h2>
        </div>
      </template>"#,
    );
}

#[test]
fn pascal_registration_used_by_any_spelling() {
    for tag in [
        "TheButton",
        "theButton",
        "the-button",
        "The-button",
        "The-Button",
        "the-Button",
    ] {
        assert_valid(&sfc_with_template(&format!("<{tag} />")));
        assert_valid(&sfc_with_template(&format!(r#"<component is="{tag}" />"#)));
    }
}

#[test]
fn used_alongside_plain_elements() {
    assert_valid(&sfc_with_template(
        r#"<h2>Lorem ipsum</h2>
          <component is="TheButton" />"#,
    ));
}

#[test]
fn string_keys_used_by_exact_spelling() {
    let keys = r#"<script>
        export default {
          components: {
            'the-button': TheButton,
            'next_Button': NextButton
          }
        }
      </script>"#;

    assert_valid(&format!(
        r#"<template>
        <div>
          <the-button />
          <next_Button />
        </div>
      </template>
      {keys}"#
    ));
    assert_valid(&format!(
        r#"<template>
        <div>
          <component is="the-button" />
          <component is="next_Button" />
        </div>
      </template>
      {keys}"#
    ));
}

#[test]
fn render_function_without_template() {
    assert_valid(
        r#"
      <script>
        export default {
          components: {
            TheButton
          },
          render() {
            return
          }
        }
      </script>"#,
    );
}

#[test]
fn reports_component_never_used() {
    let source = r#"
        <template>
          <div>
            <h2>Lorem ipsum</h2>
          </div>
        </template>
        <script>
          export default {
            components: {
              TheButton
            },
          }
        </script>
      "#;
    let result = lint(source, "test.vue");
    assert_eq!(
        messages(&result),
        vec![(
            "The \"TheButton\" component has been registered but not used.",
            10
        )]
    );
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert_eq!(result.warning_count, 1);
}

#[test]
fn snake_case_tag_does_not_use_pascal_registration() {
    let source = r#"
        <template>
          <div>
            <h2>Lorem ipsum</h2>
            <the_button />
          </div>
        </template>
        <script>
          export default {
            components: {
              TheButton
            },
          }
        </script>
      "#;
    assert_eq!(
        messages(&lint(source, "test.vue")),
        vec![(
            "The \"TheButton\" component has been registered but not used.",
            11
        )]
    );
}

#[test]
fn kebab_key_needs_exact_tag() {
    let source = r#"
        <template>
          <div>
            <h2>Lorem ipsum</h2>
            <TheButton />
          </div>
        </template>
        <script>
          export default {
            components: {
              'the-button': TheButton
            },
          }
        </script>
      "#;
    let result = lint(source, "test.vue");
    assert_eq!(
        messages(&result),
        vec![(
            "The \"the-button\" component has been registered but not used.",
            11
        )]
    );

    let diag = &result.diagnostics[0];
    assert_eq!(
        &source[diag.start as usize..diag.end as usize],
        "'the-button': TheButton"
    );
}

#[test]
fn camel_case_key_used_by_any_plain_spelling() {
    let camel = |template: &str| {
        format!(
            r#"<template>
  <div>
    {template}
  </div>
</template>
<script>
export default {{
  components: {{ theButton }}
}}
</script>"#
        )
    };

    for template in [
        "<the-button />",
        "<theButton />",
        "<TheButton />",
        r#"<component is="the-button" />"#,
    ] {
        assert_valid(&camel(template));
    }

    assert_eq!(
        messages(&lint(&camel("<the_button />"), "test.vue")),
        vec![(
            "The \"theButton\" component has been registered but not used.",
            8
        )]
    );
}

#[test]
fn non_html_template_is_not_checked() {
    assert_valid(
        r#"<template lang="pug">
div
  the-button
</template>
<script>
export default { components: { TheButton } }
</script>"#,
    );
}

#[test]
fn component_placeholder_does_not_use_component_key() {
    let source = r#"<template>
  <component :is="current" />
</template>
<script>
export default { components: { component: Wrapper } }
</script>"#;
    assert_eq!(
        messages(&lint(source, "test.vue")),
        vec![(
            "The \"component\" component has been registered but not used.",
            5
        )]
    );
}

#[test]
fn reports_every_unused_in_declaration_order() {
    let source = r#"<template>
  <TheHeader />
</template>
<script>
export default {
  components: {
    TheFooter,
    TheHeader,
    TheAside,
  },
}
</script>"#;
    let result = lint(source, "test.vue");
    let lines: Vec<_> = result.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![7, 9]);
    assert!(result.diagnostics[0].message.contains("\"TheFooter\""));
    assert!(result.diagnostics[1].message.contains("\"TheAside\""));
}

#[test]
fn define_component_with_typescript() {
    let source = r#"<template>
  <div />
</template>
<script lang="ts">
import { defineComponent } from 'vue'
import TheButton from './TheButton.vue'

export default defineComponent({
  components: { TheButton } as Record<string, unknown>,
})
</script>"#;
    let result = lint(source, "test.vue");
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.diagnostics[0].line, 9);
}

#[test]
fn bound_is_with_string_literal() {
    assert_valid(&sfc_with_template(r#"<component :is="'TheButton'" />"#));
    assert_valid(&sfc_with_template(r#"<component v-bind:is="`the-button`" />"#));
}

#[test]
fn vue_prefixed_is_on_plain_element() {
    assert_valid(&sfc_with_template(r#"<tr is="vue:the-button" />"#));

    let result = lint(&sfc_with_template(r#"<tr is="the-button" />"#), "test.vue");
    assert_eq!(result.warning_count, 1);
}

#[test]
fn unresolved_binding_reports_by_default() {
    let source = sfc_with_template(r#"<component :is="current" />"#);
    assert_eq!(lint(&source, "test.vue").warning_count, 1);

    let config = LintConfig::from_json(
        r#"{
          "rules": {
            "vue/no-unused-components": ["warn", { "ignoreWhenBindingPresent": true }]
          }
        }"#,
    )
    .unwrap();
    let linter = Linter::with_config(&config).unwrap();
    assert!(!linter.lint_sfc(&source, "test.vue").has_diagnostics());
}

#[test]
fn script_setup_registers_nothing() {
    assert_valid(
        r#"<script setup>
import TheButton from './TheButton.vue'
</script>
<template>
  <div />
</template>"#,
    );
}

#[test]
fn canonical_matching_accepts_any_spelling() {
    let config = LintConfig::from_json(
        r#"{ "rules": { "vue/no-unused-components": ["error", { "matching": "canonical" }] } }"#,
    )
    .unwrap();
    let linter = Linter::with_config(&config).unwrap();

    let snake = sfc_with_template("<the_button />");
    assert!(!linter.lint_sfc(&snake, "test.vue").has_diagnostics());
    assert_eq!(lint(&snake, "test.vue").warning_count, 1);

    let kebab_key = r#"<template><TheButton /></template>
<script>
export default { components: { 'the-button': TheButton } }
</script>"#;
    assert!(!linter.lint_sfc(kebab_key, "test.vue").has_diagnostics());

    let unused = sfc_with_template("<div />");
    let result = linter.lint_sfc(&unused, "test.vue");
    assert_eq!(result.error_count, 1);
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
}

#[test]
fn ignore_patterns_skip_matching_names() {
    let source = r#"<template><div /></template>
<script>
export default { components: { BaseIcon, TheButton } }
</script>"#;
    let config = LintConfig::from_json(
        r#"{ "rules": { "vue/no-unused-components": ["warn", { "ignorePatterns": ["Base"] }] } }"#,
    )
    .unwrap();
    let result = Linter::with_config(&config)
        .unwrap()
        .lint_sfc(source, "test.vue");
    assert_eq!(messages(&result).len(), 1);
    assert!(result.diagnostics[0].message.contains("\"TheButton\""));
}

#[test]
fn json_output() {
    let source = r#"<template><div/></template>
<script>
export default { components: { Foo } }
</script>"#;
    let result = lint(source, "test.vue");
    let output = format_results(
        &[result],
        &[("test.vue".to_string(), source.to_string())],
        OutputFormat::Json,
    );

    insta::assert_snapshot!(output, @r#"
    [
      {
        "filePath": "test.vue",
        "messages": [
          {
            "ruleId": "vue/no-unused-components",
            "severity": 1,
            "message": "The \"Foo\" component has been registered but not used.",
            "line": 3,
            "column": 32,
            "endLine": 3,
            "endColumn": 35,
            "help": "Use it in the template as `<Foo>` or `<foo>`, or remove the registration",
            "related": [
              {
                "message": "registered here",
                "line": 3,
                "column": 32,
                "endLine": 3,
                "endColumn": 35
              }
            ]
          }
        ],
        "errorCount": 0,
        "warningCount": 1
      }
    ]
    "#);
}

#[test]
fn text_output() {
    let source = sfc_with_template("<div />");
    let result = lint(&source, "test.vue");
    let output = format_results(
        &[result],
        &[("test.vue".to_string(), source.clone())],
        OutputFormat::Text,
    );
    assert!(output.contains("The \"TheButton\" component has been registered but not used."));
    assert!(output.contains("test.vue"));
    assert!(output.contains("registered here"));
    assert!(output.ends_with("1 problem (0 errors, 1 warning) in 1 file\n"));
}
