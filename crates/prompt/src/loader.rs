//! Prompt loader for YAML prompt definitions.
//!
//! Workspace prompts live in `.netassist/prompts/<id>.yml` and override the
//! built-in definition with the same id.

use crate::builtin::{builtin_ids, builtin_prompt};
use crate::types::{PromptDefinition, PromptSource};
use netassist_core::config::NETASSIST_DIR;
use netassist_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(NETASSIST_DIR).join("prompts")
}

/// Load a prompt definition by ID from the workspace.
///
/// # Example
/// ```no_run
/// use netassist_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "network.explain")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    if definition.id != prompt_id {
        return Err(AppError::Prompt(format!(
            "Prompt file {:?} declares id '{}'",
            prompt_file, definition.id
        )));
    }

    tracing::debug!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// List prompt IDs defined in the workspace.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids = Vec::new();

    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                prompt_ids.push(stem.to_string());
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

/// Resolve a prompt: the workspace file if present, otherwise the built-in.
pub fn resolve_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    if prompts_dir(workspace_path)
        .join(format!("{}.yml", prompt_id))
        .exists()
    {
        tracing::debug!(prompt = prompt_id, "Using workspace prompt override");
        return load_prompt(workspace_path, prompt_id);
    }

    builtin_prompt(prompt_id)
        .unwrap_or_else(|| Err(AppError::Prompt(format!("Unknown prompt: {}", prompt_id))))
}

/// Every resolvable prompt with its source, sorted by id.
pub fn available_prompts(workspace_path: &Path) -> AppResult<Vec<(PromptDefinition, PromptSource)>> {
    let overrides = list_prompts(workspace_path)?;
    let mut prompts = Vec::new();

    for id in builtin_ids() {
        if !overrides.iter().any(|o| o == id) {
            if let Some(def) = builtin_prompt(id) {
                prompts.push((def?, PromptSource::Builtin));
            }
        }
    }

    for id in &overrides {
        prompts.push((load_prompt(workspace_path, id)?, PromptSource::Workspace));
    }

    prompts.sort_by(|a, b| a.0.id.cmp(&b.0.id));
    Ok(prompts)
}

/// Validate a prompt definition.
pub fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.api_version.is_empty() {
        return Err(AppError::Prompt(
            "Prompt apiVersion cannot be empty".to_string(),
        ));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    // Expected format: x.y
    let mut parts = def.api_version.split('.');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
    );
    if !well_formed {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if def.examples.is_empty() != def.example_template.is_none() {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' must set both examples and exampleTemplate, or neither",
            def.id
        )));
    }

    if !def.input_variables.is_empty() {
        let texts = [def.prefix.as_deref(), def.system.as_deref(), Some(def.template.as_str())];
        for text in texts.into_iter().flatten() {
            for name in crate::template::extract_variables(text) {
                if !def.input_variables.contains(&name) {
                    return Err(AppError::Prompt(format!(
                        "Prompt '{}' uses undeclared variable '{}'",
                        def.id, name
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_prompt(dir: &Path, id: &str, body: &str) -> PathBuf {
        let dir = prompts_dir(dir);
        fs::create_dir_all(&dir).unwrap();
        let file_path = dir.join(format!("{}.yml", id));
        fs::write(&file_path, body).unwrap();
        file_path
    }

    fn valid_body(id: &str) -> String {
        format!(
            "id: {}\ntitle: \"Test Prompt\"\napiVersion: \"1.0\"\ntemplate: \"Explain {{{{topic}}}}\"\ninputVariables: [topic]\n",
            id
        )
    }

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "test.prompt", &valid_body("test.prompt"));

        let prompt = load_prompt(temp_dir.path(), "test.prompt").unwrap();
        assert_eq!(prompt.id, "test.prompt");
        assert_eq!(prompt.template, "Explain {{topic}}");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "invalid", "invalid: yaml: content:");
        assert!(load_prompt(temp_dir.path(), "invalid").is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "prompt2", &valid_body("prompt2"));
        create_test_prompt(temp_dir.path(), "prompt1", &valid_body("prompt1"));

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["prompt1".to_string(), "prompt2".to_string()]);
    }

    #[test]
    fn test_workspace_overrides_builtin() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "network.explain", &valid_body("network.explain"));

        let resolved = resolve_prompt(temp_dir.path(), "network.explain").unwrap();
        assert_eq!(resolved.template, "Explain {{topic}}");

        let builtin = resolve_prompt(temp_dir.path(), "network.steps").unwrap();
        assert!(builtin.template.starts_with("List 3 common troubleshooting steps"));

        let all = available_prompts(temp_dir.path()).unwrap();
        let explain = all.iter().find(|(d, _)| d.id == "network.explain").unwrap();
        assert_eq!(explain.1, PromptSource::Workspace);
        assert_eq!(all.iter().filter(|(d, _)| d.id == "network.explain").count(), 1);
    }

    #[test]
    fn test_unknown_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(resolve_prompt(temp_dir.path(), "nope").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_version_and_undeclared_vars() {
        let mut def: PromptDefinition = serde_yaml::from_str(&valid_body("a.b")).unwrap();
        assert!(validate_prompt(&def).is_ok());

        def.api_version = "1".to_string();
        assert!(validate_prompt(&def).is_err());

        def.api_version = "1.0".to_string();
        def.template = "Explain {{topic}} to {{audience}}".to_string();
        assert!(validate_prompt(&def).is_err());
    }
}
