//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::document::{AppendPlacement, SectionNumbering};

/// Project-local config directory
pub const CONFIG_DIR: &str = ".rickskb";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Knowledge base file used when nothing else is configured
pub const DEFAULT_KB_FILE: &str = "Ricks_KB.txt";

/// Overrides `kb.path`
pub const ENV_KB_FILE: &str = "RICKSKB_FILE";

/// Fallback for `llm.api_key`
pub const ENV_API_KEY: &str = "RICKSKB_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub kb: KbConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Directory that relative `kb.path` values resolve against
    #[serde(skip)]
    root: Option<PathBuf>,

    /// Path given on the command line, wins over everything
    #[serde(skip)]
    kb_override: Option<PathBuf>,
}

/// Knowledge base file and editing policies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbConfig {
    #[serde(default = "default_kb_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub append_placement: AppendPlacement,

    #[serde(default)]
    pub numbering: SectionNumbering,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            path: default_kb_path(),
            append_placement: AppendPlacement::default(),
            numbering: SectionNumbering::default(),
        }
    }
}

fn default_kb_path() -> PathBuf {
    PathBuf::from(DEFAULT_KB_FILE)
}

/// Completion server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible completion server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_stop")]
    pub stop: Vec<String>,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// System message for knowledge base questions
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            stop: default_stop(),
            timeout_secs: default_llm_timeout(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl LlmConfig {
    /// API key from config, else from the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(ENV_API_KEY).ok())
            .filter(|k| !k.is_empty())
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_model() -> String {
    "tinyllama-1.1b-chat-v1.0".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.7
}

fn default_stop() -> Vec<String> {
    vec!["<|user|>".to_string(), "</s>".to_string()]
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_system_prompt() -> String {
    "You are Rick Sanchez's AI assistant. You have access to his knowledge base.\n\
     Use the knowledge base to answer questions accurately in Rick's characteristic tone."
        .to_string()
}

/// MCP server identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

fn default_server_name() -> String {
    "RickKnowledgeBase".to_string()
}

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit file if given, else from default locations
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.root = Self::root_for(path);
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Use this knowledge base file regardless of config and environment
    pub fn override_kb_path(&mut self, path: impl Into<PathBuf>) {
        self.kb_override = Some(path.into());
    }

    /// Knowledge base file path with priority:
    /// 1. Command-line override
    /// 2. RICKSKB_FILE env var
    /// 3. `kb.path`, relative to the project root holding `.rickskb/`
    pub fn kb_path(&self) -> PathBuf {
        if let Some(path) = &self.kb_override {
            return path.clone();
        }

        if let Ok(env_path) = std::env::var(ENV_KB_FILE) {
            if !env_path.is_empty() {
                return PathBuf::from(env_path);
            }
        }

        match &self.root {
            Some(root) if self.kb.path.is_relative() => root.join(&self.kb.path),
            _ => self.kb.path.clone(),
        }
    }

    /// Find local .rickskb/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get global config path (~/.rickskb/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|d| d.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// `<root>/.rickskb/config.toml` → `<root>`; any other file → its directory
    fn root_for(config_path: &Path) -> Option<PathBuf> {
        let dir = config_path.parent()?;
        if dir.file_name().is_some_and(|n| n == CONFIG_DIR) {
            dir.parent().map(Path::to_path_buf)
        } else {
            Some(dir.to_path_buf())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.kb.path, PathBuf::from(DEFAULT_KB_FILE));
        assert_eq!(config.kb.append_placement, AppendPlacement::NextNumber);
        assert_eq!(config.kb.numbering, SectionNumbering::HeaderCount);
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.llm.stop, vec!["<|user|>", "</s>"]);
        assert_eq!(config.server.name, "RickKnowledgeBase");
    }

    #[test]
    fn test_saved_defaults_are_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("temperature = 0.7\n"));
        assert_eq!(Config::load_from(&path).unwrap().llm.temperature, 0.7);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [kb]
            path = "notes/kb.txt"
            append_placement = "next-header"
            numbering = "max-plus-one"

            [llm]
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.kb.append_placement, AppendPlacement::NextHeader);
        assert_eq!(config.kb.numbering, SectionNumbering::MaxPlusOne);
        assert!((config.llm.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.llm.model, "tinyllama-1.1b-chat-v1.0");
    }

    #[test]
    fn test_relative_path_resolves_against_project_root() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = Config::default();
        config.kb.path = PathBuf::from("kb.txt");
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_override_wins() {
        let mut config = Config::default();
        config.override_kb_path("/tmp/explicit.txt");
        assert_eq!(config.kb_path(), PathBuf::from("/tmp/explicit.txt"));
    }

    #[test]
    fn test_round_trip_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.kb.numbering = SectionNumbering::MaxPlusOne;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.kb.numbering, SectionNumbering::MaxPlusOne);
        assert_eq!(loaded.root.as_deref(), Some(dir.path()));
    }
}
