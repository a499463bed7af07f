//! Provider identification.

use std::fmt;

/// LLM providers the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Local Ollama server over HTTP
    Ollama,
    /// In-process scripted client (echoes prompts when nothing is queued)
    Scripted,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "scripted" | "dry-run" => Some(Self::Scripted),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Scripted => "scripted",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("Ollama "), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("scripted"), Some(ProviderType::Scripted));
        assert_eq!(ProviderType::parse("dry-run"), Some(ProviderType::Scripted));
        assert_eq!(ProviderType::parse("openai"), None);
    }
}
