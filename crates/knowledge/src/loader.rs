//! Document loading from the docs directory.

use crate::types::Document;
use netassist_core::{AppError, AppResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Load every `*.<extension>` file under `dir`, recursively, sorted by path.
///
/// Files that are not valid UTF-8 are skipped with a warning.
pub fn load_documents(dir: &Path, extension: &str) -> AppResult<Vec<Document>> {
    if !dir.is_dir() {
        return Err(AppError::Knowledge(format!(
            "Documentation directory not found: {}",
            dir.display()
        )));
    }

    let extension = extension.trim_start_matches('.');
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping non UTF-8 file: {:?}", path);
                continue;
            }
            Err(e) => {
                return Err(AppError::Knowledge(format!(
                    "Failed to read {:?}: {}",
                    path, e
                )))
            }
        };

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let source = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        tracing::debug!("Loaded document {} ({} bytes)", source, content.len());
        documents.push(Document::new(source, content));
    }

    tracing::info!(
        "Loaded {} documents from {}",
        documents.len(),
        dir.display()
    );

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_documents_recursive_and_filtered() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("ospf")).unwrap();
        fs::write(temp.path().join("runbook.md"), "# Runbook").unwrap();
        fs::write(temp.path().join("ospf/exstart.md"), "## EXSTART").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_documents(temp.path(), "md").unwrap();
        let sources: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["ospf/exstart.md", "runbook.md"]);
        assert_eq!(docs[1].content, "# Runbook");
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "text").unwrap();
        assert_eq!(load_documents(temp.path(), ".md").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_documents(&temp.path().join("docs"), "md").unwrap_err();
        assert!(matches!(err, AppError::Knowledge(_)));
        assert!(err.to_string().contains("Documentation directory not found"));
    }
}
