//! # Business Rules
//!
//! Cross-field checks the structural schema cannot express.
//!
//! Each [`BusinessRule`] is a pure function over the `application_template`
//! section of an already structurally valid document. Rules never fail
//! validation on their own: they produce warnings, and only the batch
//! runner's strict policy turns warnings into a failing exit status.
//!
//! Every rule in [`BUSINESS_RULES`] is evaluated; a violated rule does not
//! stop the remaining ones.
//!
//! `readme_template`, `readme_markdown_template` and `use_module_readme`
//! deliberately have no exclusivity rule.

use std::fmt;

use serde_json::{Map, Value};

/// A named cross-field rule over the `application_template` section.
#[derive(Clone, Copy)]
pub struct BusinessRule {
    /// Stable identifier, reported alongside each warning.
    pub name: &'static str,
    /// What the rule enforces.
    pub description: &'static str,
    /// Returns one message per violation; empty when the rule holds.
    pub check: fn(&Map<String, Value>) -> Vec<String>,
}

/// All rules, in evaluation and reporting order.
pub const BUSINESS_RULES: &[BusinessRule] = &[
    BusinessRule {
        name: "module-source-requires-module-id",
        description: "A template that sets module_source must also set module_id",
        check: module_source_requires_module_id,
    },
    BusinessRule {
        name: "agent-mode-requires-agent-pool",
        description: "tf_execution_mode 'agent' requires tf_agent_pool_id",
        check: agent_mode_requires_agent_pool,
    },
];

/// A violated business rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleWarning {
    /// Name of the rule that produced this warning.
    pub rule: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Debug for BusinessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Run every rule in [`BUSINESS_RULES`] against `parsed`.
///
/// Returns an empty list when the document has no `application_template`
/// object; the structural validator is what reports that case.
pub fn check_business_rules(parsed: &Value) -> Vec<RuleWarning> {
    let Some(template) = parsed.get("application_template").and_then(Value::as_object) else {
        return Vec::new();
    };

    BUSINESS_RULES
        .iter()
        .flat_map(|rule| {
            (rule.check)(template)
                .into_iter()
                .map(move |message| RuleWarning {
                    rule: rule.name,
                    message,
                })
        })
        .collect()
}

fn non_empty_str<'a>(template: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    template
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn module_source_requires_module_id(template: &Map<String, Value>) -> Vec<String> {
    if non_empty_str(template, "module_source").is_some()
        && non_empty_str(template, "module_id").is_none()
    {
        vec!["'module_source' is set but 'module_id' is missing or empty; \
              set both module_source and module_id"
            .to_string()]
    } else {
        Vec::new()
    }
}

fn agent_mode_requires_agent_pool(template: &Map<String, Value>) -> Vec<String> {
    let agent_mode = template.get("tf_execution_mode").and_then(Value::as_str) == Some("agent");
    if agent_mode && non_empty_str(template, "tf_agent_pool_id").is_none() {
        vec!["'tf_execution_mode' is 'agent' but 'tf_agent_pool_id' is missing or empty".to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(template_extra: Value) -> Value {
        let mut template = json!({"id": "tpl-1", "name": "Web app"});
        if let (Some(t), Some(extra)) = (template.as_object_mut(), template_extra.as_object()) {
            t.extend(extra.clone());
        }
        json!({
            "namespace": {"id": "ns-1"},
            "application_template": template
        })
    }

    #[test]
    fn clean_document_has_no_warnings() {
        assert!(check_business_rules(&document(json!({}))).is_empty());
    }

    #[test]
    fn module_source_without_module_id_warns_once() {
        let warnings = check_business_rules(&document(json!({"module_source": "x"})));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, "module-source-requires-module-id");
        assert!(warnings[0].message.contains("module_source"));
        assert!(warnings[0].message.contains("module_id"));
    }

    #[test]
    fn module_id_clears_module_source_warning() {
        let warnings = check_business_rules(&document(json!({
            "module_source": "x",
            "module_id": "y"
        })));
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty_module_id_still_warns() {
        let warnings = check_business_rules(&document(json!({
            "module_source": "x",
            "module_id": ""
        })));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_module_source_does_not_warn() {
        let warnings = check_business_rules(&document(json!({"module_source": ""})));
        assert!(warnings.is_empty());
    }

    #[test]
    fn agent_mode_without_pool_warns_once() {
        let warnings = check_business_rules(&document(json!({"tf_execution_mode": "agent"})));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, "agent-mode-requires-agent-pool");
        assert!(warnings[0].to_string().contains("tf_agent_pool_id"));
    }

    #[test]
    fn agent_mode_with_pool_is_clean() {
        let warnings = check_business_rules(&document(json!({
            "tf_execution_mode": "agent",
            "tf_agent_pool_id": "pool-1"
        })));
        assert!(warnings.is_empty());
    }

    #[test]
    fn other_execution_modes_never_warn() {
        for mode in ["remote", "local", "Agent", ""] {
            let warnings = check_business_rules(&document(json!({"tf_execution_mode": mode})));
            assert!(warnings.is_empty(), "mode {mode:?} produced {warnings:?}");
        }
    }

    #[test]
    fn all_rules_are_evaluated() {
        let warnings = check_business_rules(&document(json!({
            "module_source": "x",
            "tf_execution_mode": "agent"
        })));
        let rules: Vec<&str> = warnings.iter().map(|w| w.rule).collect();
        assert_eq!(
            rules,
            vec!["module-source-requires-module-id", "agent-mode-requires-agent-pool"]
        );
    }

    #[test]
    fn readme_fields_are_permissive() {
        let mut doc = document(json!({
            "readme_template": "inline",
            "readme_markdown_template": "# inline"
        }));
        doc["use_module_readme"] = json!(true);
        assert!(check_business_rules(&doc).is_empty());
    }

    #[test]
    fn missing_template_section_yields_nothing() {
        assert!(check_business_rules(&json!({"namespace": {"id": "ns-1"}})).is_empty());
        assert!(check_business_rules(&Value::Null).is_empty());
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = BUSINESS_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUSINESS_RULES.len());
    }
}
