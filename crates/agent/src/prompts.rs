//! Prompt lookup for the agent components.

use netassist_core::{AppError, AppResult};
use netassist_prompt::{builtin_prompt, resolve_prompt, PromptDefinition};
use std::path::{Path, PathBuf};

/// Resolves prompt ids, preferring workspace overrides when a workspace is set.
#[derive(Debug, Clone, Default)]
pub struct PromptResolver {
    workspace: Option<PathBuf>,
}

impl PromptResolver {
    /// Built-in prompts only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Workspace overrides in `.netassist/prompts/`, then built-ins.
    pub fn workspace(path: impl AsRef<Path>) -> Self {
        Self {
            workspace: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn get(&self, id: &str) -> AppResult<PromptDefinition> {
        match &self.workspace {
            Some(workspace) => resolve_prompt(workspace, id),
            None => builtin_prompt(id)
                .unwrap_or_else(|| Err(AppError::Prompt(format!("Unknown prompt: {}", id)))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lookup() {
        let def = PromptResolver::builtin().get("network.steps").unwrap();
        assert_eq!(def.id, "network.steps");
        assert!(PromptResolver::builtin().get("nope").is_err());
    }

    #[test]
    fn test_workspace_override_wins() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".netassist/prompts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("network.steps.yml"),
            "id: network.steps\ntitle: Steps\napiVersion: \"1.0\"\ntemplate: \"Two steps for {{protocol}}.\"\ninputVariables: [protocol]\n",
        )
        .unwrap();

        let def = PromptResolver::workspace(temp.path()).get("network.steps").unwrap();
        assert_eq!(def.template, "Two steps for {{protocol}}.");
        assert!(PromptResolver::workspace(temp.path()).get("network.explain").is_ok());
    }
}
