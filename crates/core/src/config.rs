//! Configuration management for NetAssist.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Defaults
//! - Config files (.netassist/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric, with most state stored in `.netassist/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Name of the per-workspace state directory.
pub const NETASSIST_DIR: &str = ".netassist";

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["ollama", "scripted"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .netassist/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("ollama" or "scripted")
    pub provider: String,

    /// Base URL of the Ollama server
    pub endpoint: String,

    /// Model used by the prompt, chain, agent and RAG commands
    pub model: String,

    /// Model used by the interactive chatbot
    pub chat_model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging and tool traces)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Knowledge base settings
    pub knowledge: KnowledgeSettings,

    /// Device inventory file for the live chatbot
    pub devices_file: Option<PathBuf>,
}

/// Settings for document loading, embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeSettings {
    /// Documentation directory, relative to the workspace
    pub docs_dir: PathBuf,

    /// File extension of documents to load
    pub extension: String,

    /// Embedding provider ("ollama" or "trigram")
    pub embedding_provider: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Embedding dimensions
    pub dimensions: usize,

    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Overlap between neighbouring chunks in characters
    pub chunk_overlap: usize,

    /// Results returned by documentation search
    pub search_k: usize,

    /// Results retrieved by the RAG chain
    pub rag_k: usize,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            extension: "md".to_string(),
            embedding_provider: "ollama".to_string(),
            embedding_model: "all-minilm".to_string(),
            dimensions: 384,
            chunk_size: 500,
            chunk_overlap: 100,
            search_k: 2,
            rag_k: 3,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    knowledge: Option<KnowledgeSettings>,
    devices: Option<DevicesSection>,
    workspace: Option<WorkspaceSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    chat_model: Option<String>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DevicesSection {
    inventory: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            chat_model: "qwen2.5".to_string(),
            timeout_secs: 120,
            log_level: None,
            verbose: false,
            no_color: false,
            knowledge: KnowledgeSettings::default(),
            devices_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML config file and environment variables.
    ///
    /// Environment variables:
    /// - `NETASSIST_WORKSPACE`: Override workspace path
    /// - `NETASSIST_CONFIG`: Path to config file
    /// - `NETASSIST_MODEL`: Model identifier
    /// - `NETASSIST_CHAT_MODEL`: Chatbot model identifier
    /// - `OLLAMA_URL`: Ollama base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use netassist_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Like [`AppConfig::load`], with the workspace and config file chosen on the
    /// command line. Explicit paths win over `NETASSIST_WORKSPACE` and
    /// `NETASSIST_CONFIG`; the YAML file is merged once, before the environment.
    pub fn load_from(workspace: Option<&Path>, config_file: Option<&Path>) -> AppResult<Self> {
        Self::load_with_env(workspace, config_file, |key| std::env::var(key).ok())
    }

    fn load_with_env<F>(
        workspace: Option<&Path>,
        config_file: Option<&Path>,
        env: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = workspace
            .map(Path::to_path_buf)
            .or_else(|| env("NETASSIST_WORKSPACE").map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = config_file
            .map(Path::to_path_buf)
            .or_else(|| env("NETASSIST_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        match config.config_file.clone() {
            Some(path) if path.exists() => config = config.merge_yaml(&path)?,
            Some(path) => {
                return Err(AppError::Config(format!("Config file not found: {:?}", path)));
            }
            None => {
                let path = config.netassist_dir().join("config.yaml");
                if path.exists() {
                    config = config.merge_yaml(&path)?;
                }
            }
        }

        // Environment variables override YAML config
        if let Some(model) = env("NETASSIST_MODEL") {
            config.model = model;
        }

        if let Some(chat_model) = env("NETASSIST_CHAT_MODEL") {
            config.chat_model = chat_model;
        }

        if let Some(endpoint) = env("OLLAMA_URL") {
            config.endpoint = endpoint;
        }

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into a copy of this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(chat_model) = llm.chat_model {
                result.chat_model = chat_model;
            }
            if let Some(timeout) = llm.timeout {
                result.timeout_secs = timeout;
            }
        }

        if let Some(knowledge) = config_file.knowledge {
            result.knowledge = knowledge;
        }

        if let Some(devices) = config_file.devices {
            if let Some(inventory) = devices.inventory {
                result.devices_file = Some(PathBuf::from(inventory));
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        model: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .netassist directory.
    pub fn netassist_dir(&self) -> PathBuf {
        self.workspace.join(NETASSIST_DIR)
    }

    /// Ensure the .netassist directory exists.
    pub fn ensure_netassist_dir(&self) -> AppResult<()> {
        let dir = self.netassist_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create {} directory: {}", NETASSIST_DIR, e))
            })?;
        }
        Ok(())
    }

    /// Directory holding the persisted vector index.
    pub fn index_dir(&self) -> PathBuf {
        self.netassist_dir().join("index")
    }

    /// Directory holding the source documentation.
    pub fn docs_dir(&self) -> PathBuf {
        if self.knowledge.docs_dir.is_absolute() {
            self.knowledge.docs_dir.clone()
        } else {
            self.workspace.join(&self.knowledge.docs_dir)
        }
    }

    /// Directory holding workspace prompt overrides.
    pub fn prompts_dir(&self) -> PathBuf {
        self.netassist_dir().join("prompts")
    }

    /// Device inventory path, resolved against the workspace.
    pub fn devices_path(&self) -> Option<PathBuf> {
        self.devices_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.workspace.join(p)
            }
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        let k = &self.knowledge;
        if k.chunk_size == 0 {
            return Err(AppError::Config("chunkSize must be greater than 0".to_string()));
        }
        if k.chunk_overlap >= k.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                k.chunk_overlap, k.chunk_size
            )));
        }
        if k.search_k == 0 || k.rag_k == 0 {
            return Err(AppError::Config("top-k values must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.chat_model, "qwen2.5");
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.knowledge.chunk_size, 500);
        assert_eq!(config.knowledge.chunk_overlap, 100);
        assert!(!config.verbose);
    }

    #[test]
    fn test_state_dirs() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/tmp/ws");
        assert_eq!(config.netassist_dir(), PathBuf::from("/tmp/ws/.netassist"));
        assert_eq!(config.index_dir(), PathBuf::from("/tmp/ws/.netassist/index"));
        assert_eq!(config.docs_dir(), PathBuf::from("/tmp/ws/docs"));
    }

    #[test]
    fn test_with_overrides() {
        let overridden = AppConfig::default().with_overrides(
            None,
            None,
            Some("mistral".to_string()),
            Some("http://10.0.0.5:11434".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.model, "mistral");
        assert_eq!(overridden.endpoint, "http://10.0.0.5:11434");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "llm:\n  model: phi3\n  chatModel: llama3.1\n  timeout: 30\nknowledge:\n  embeddingProvider: trigram\n  chunkSize: 800\ndevices:\n  inventory: lab/devices.yml\n",
        )
        .unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.model, "phi3");
        assert_eq!(merged.chat_model, "llama3.1");
        assert_eq!(merged.timeout_secs, 30);
        assert_eq!(merged.knowledge.embedding_provider, "trigram");
        assert_eq!(merged.knowledge.chunk_size, 800);
        // unspecified knowledge keys keep their defaults
        assert_eq!(merged.knowledge.chunk_overlap, 100);
        assert_eq!(merged.devices_file, Some(PathBuf::from("lab/devices.yml")));
    }

    fn workspace_with_config(yaml: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(NETASSIST_DIR)).unwrap();
        std::fs::write(dir.path().join(NETASSIST_DIR).join("config.yaml"), yaml).unwrap();
        dir
    }

    #[test]
    fn test_env_overrides_workspace_yaml() {
        let dir = workspace_with_config("llm:\n  model: from-yaml\n  chatModel: yaml-chat\n");
        let env = |key: &str| match key {
            "NETASSIST_MODEL" => Some("from-env".to_string()),
            _ => None,
        };

        let config = AppConfig::load_with_env(Some(dir.path()), None, env).unwrap();
        assert_eq!(config.model, "from-env");
        assert_eq!(config.chat_model, "yaml-chat");
    }

    #[test]
    fn test_workspace_from_env_reads_its_yaml() {
        let dir = workspace_with_config("llm:\n  model: from-yaml\n");
        let workspace = dir.path().to_string_lossy().to_string();
        let env = move |key: &str| (key == "NETASSIST_WORKSPACE").then(|| workspace.clone());

        let config = AppConfig::load_with_env(None, None, env).unwrap();
        assert_eq!(config.workspace, dir.path().to_path_buf());
        assert_eq!(config.model, "from-yaml");
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        let result = AppConfig::load_with_env(Some(dir.path()), Some(&missing), |_| None);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("Config file not found")));
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.knowledge.chunk_overlap = 500;
        assert!(config.validate().is_err());
    }
}
