//! Few-shot prompt templates.

use crate::template::{check_variables, render_template, PromptTemplate, PromptVars};
use netassist_core::AppResult;

pub const DEFAULT_EXAMPLE_SEPARATOR: &str = "\n\n";

/// Prefix, worked examples and suffix joined into one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct FewShotPromptTemplate {
    pub examples: Vec<PromptVars>,
    pub example_prompt: PromptTemplate,
    pub prefix: String,
    pub suffix: String,
    pub input_variables: Vec<String>,
    pub example_separator: String,
}

impl FewShotPromptTemplate {
    pub fn new(
        examples: Vec<PromptVars>,
        example_prompt: PromptTemplate,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        input_variables: Vec<String>,
    ) -> Self {
        Self {
            examples,
            example_prompt,
            prefix: prefix.into(),
            suffix: suffix.into(),
            input_variables,
            example_separator: DEFAULT_EXAMPLE_SEPARATOR.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.example_separator = separator.into();
        self
    }

    /// Render prefix, each example, then the suffix. Empty pieces are dropped.
    pub fn format(&self, variables: &PromptVars) -> AppResult<String> {
        check_variables(&self.input_variables, variables)?;

        let mut pieces = Vec::with_capacity(self.examples.len() + 2);
        pieces.push(render_template(&self.prefix, variables)?);
        for example in &self.examples {
            pieces.push(self.example_prompt.format(example)?);
        }
        pieces.push(render_template(&self.suffix, variables)?);

        Ok(pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(&self.example_separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::vars;

    fn command_template() -> FewShotPromptTemplate {
        FewShotPromptTemplate::new(
            vec![
                vars([
                    ("command", "show ip route"),
                    ("description", "Displays the routing table."),
                ]),
                vars([
                    ("command", "show ip bgp summary"),
                    ("description", "Displays BGP neighbor status and prefix counts."),
                ]),
            ],
            PromptTemplate::from_template("Command: {{command}}\nDescription: {{description}}"),
            "Describe Cisco commands.\n\nExamples:",
            "\nCommand: {{input}}\nDescription:",
            vec!["input".to_string()],
        )
    }

    #[test]
    fn test_format_joins_examples() {
        let rendered = command_template()
            .format(&vars([("input", "show cdp neighbors")]))
            .unwrap();

        assert_eq!(
            rendered,
            "Describe Cisco commands.\n\nExamples:\n\n\
             Command: show ip route\nDescription: Displays the routing table.\n\n\
             Command: show ip bgp summary\nDescription: Displays BGP neighbor status and prefix counts.\n\n\
             \nCommand: show cdp neighbors\nDescription:"
        );
    }

    #[test]
    fn test_missing_input_is_error() {
        assert!(command_template().format(&PromptVars::new()).is_err());
    }

    #[test]
    fn test_empty_prefix_is_skipped() {
        let mut template = command_template().with_separator("\n---\n");
        template.prefix.clear();
        template.examples.truncate(1);
        let rendered = template.format(&vars([("input", "show vlan")])).unwrap();
        assert!(rendered.starts_with("Command: show ip route"));
        assert!(rendered.contains("\n---\n\nCommand: show vlan"));
    }
}
