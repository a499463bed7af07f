//! String prompt templates rendered with Handlebars.
//!
//! Placeholders use `{{name}}` syntax. Rendering runs in strict mode, so a
//! placeholder without a value is an error instead of an empty string.

use handlebars::Handlebars;
use netassist_core::{AppError, AppResult};
use std::collections::HashMap;

/// Variables supplied to a template.
pub type PromptVars = HashMap<String, String>;

/// Build a [`PromptVars`] map from string pairs.
pub fn vars<K, V, I>(pairs: I) -> PromptVars
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Render a Handlebars template with variables.
pub fn render_template(template: &str, variables: &PromptVars) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

/// Names of the `{{name}}` placeholders in a template, in first-use order.
///
/// Block helpers, comments and partials are skipped.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };

        let inner = after[..end]
            .trim_start_matches('{')
            .trim_start_matches('~')
            .trim();
        rest = &after[end + 2..];

        if inner.is_empty() || inner.starts_with(['#', '/', '!', '>', '^']) || inner == "else" {
            continue;
        }

        if let Some(name) = inner.split_whitespace().next() {
            let name = name.trim_end_matches('~').to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

/// A text template with declared input variables.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub template: String,
    pub input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a template with explicitly declared variables.
    pub fn new<I, S>(template: impl Into<String>, input_variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template: template.into(),
            input_variables: input_variables.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a template whose variables are inferred from its placeholders.
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        let input_variables = extract_variables(&template);
        Self {
            template,
            input_variables,
        }
    }

    /// Render the template.
    ///
    /// Every declared input variable must be present in `variables`.
    pub fn format(&self, variables: &PromptVars) -> AppResult<String> {
        check_variables(&self.input_variables, variables)?;
        render_template(&self.template, variables)
    }
}

pub(crate) fn check_variables(required: &[String], variables: &PromptVars) -> AppResult<()> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|name| !variables.contains_key(name.as_str()))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Prompt(format!(
            "Missing template variables: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_topic_template() {
        let template =
            PromptTemplate::from_template("Explain {{topic}} to a {{audience}}. Keep it under 100 words.");
        assert_eq!(template.input_variables, vec!["topic", "audience"]);

        let rendered = template
            .format(&vars([
                ("topic", "OSPF routing protocol"),
                ("audience", "beginner network engineer"),
            ]))
            .unwrap();
        assert_eq!(
            rendered,
            "Explain OSPF routing protocol to a beginner network engineer. Keep it under 100 words."
        );
    }

    #[test]
    fn test_missing_variable_is_error() {
        let template = PromptTemplate::from_template("Troubleshoot {{protocol}}");
        let err = template.format(&PromptVars::new()).unwrap_err();
        assert!(err.to_string().contains("protocol"));
    }

    #[test]
    fn test_strict_mode_rejects_undeclared_placeholder() {
        let template = PromptTemplate::new("{{a}} and {{b}}", ["a"]);
        assert!(template.format(&vars([("a", "x")])).is_err());
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let rendered =
            render_template("ACL: {{acl}}", &vars([("acl", "permit tcp any any eq 443 <log> & \"x\"")]))
                .unwrap();
        assert_eq!(rendered, "ACL: permit tcp any any eq 443 <log> & \"x\"");
    }

    #[test]
    fn test_extract_variables_dedups_and_skips_helpers() {
        let names = extract_variables("{{a}} {{#if b}}{{c}}{{/if}} {{a}} {{! note}} {{{ d }}}");
        assert_eq!(names, vec!["a", "c", "d"]);
    }
}
