//! `rickskb config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! rickskb config                          # Show config file
//! rickskb config llm.base_url             # Get specific value
//! rickskb config llm.max_tokens 256       # Set value
//! rickskb config kb.numbering max-plus-one
//! rickskb config --path                   # Show config locations
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{Config, CONFIG_DIR, CONFIG_FILE};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., kb.path, llm.base_url)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// List all config values
    #[arg(long)]
    pub list: bool,

    /// Edit config file in $EDITOR
    #[arg(short, long)]
    pub edit: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Use global config (~/.rickskb/config.toml) instead of local
    #[arg(short, long)]
    pub global: bool,
}

fn get_config_path(global: bool) -> PathBuf {
    if global {
        Config::global_config_path()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE))
    } else {
        Config::find_local_config().unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE))
    }
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let config_path = get_config_path(args.global);

    if args.path {
        println!("Global: {}", get_config_path(true).display());
        println!("Local:  {}", get_config_path(false).display());
        println!();
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    if args.edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

        // Create config file if it doesn't exist
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            println!("Created {}", config_path.display());
        }

        std::process::Command::new(&editor)
            .arg(&config_path)
            .status()
            .with_context(|| format!("Failed to open editor: {}", editor))?;
        return Ok(());
    }

    let Some(key) = args.key.as_deref().filter(|_| !args.list) else {
        // List all config from file
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            println!("Configuration ({}):\n", config_path.display());
            println!("{}", content);
        } else {
            println!("No config file at {}", config_path.display());
            println!();
            println!("Create one with:");
            println!("  rickskb init");
            println!("  rickskb config llm.base_url http://127.0.0.1:8080");
        }
        return Ok(());
    };

    if let Some(value) = &args.value {
        set_config_value(&config_path, key, value)?;
        println!("✓ Set {} = {} (in {})", key, value, config_path.display());
    } else {
        match get_config_value(&config_path, key)? {
            Some(v) => println!("{}", v),
            None => match default_value(key)? {
                Some(v) => println!("{} (default)", v),
                None => println!("(not set)"),
            },
        }
    }

    Ok(())
}

/// Set a nested config value using dot notation (e.g., "llm.max_tokens")
///
/// The file is only written if the edited config still loads.
fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    use toml_edit::{value, DocumentMut};

    // Load or create document
    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    // Parse key into parts (e.g., "llm.max_tokens" -> ["llm", "max_tokens"])
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        [top] => doc[*top] = value(parse_toml_value(val)),
        [section, field] => {
            if doc.get(section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*field] = value(parse_toml_value(val));
        }
        _ => anyhow::bail!("Key too deep: {}. Max depth is section.key", key),
    }

    let updated = doc.to_string();
    toml::from_str::<Config>(&updated)
        .with_context(|| format!("{} = {} is not a valid setting", key, val))?;

    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;
    Ok(())
}

/// Get a config value by dot notation key
fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let doc: toml::Table = toml::from_str(&content).context("Failed to parse config.toml")?;

    Ok(lookup(&doc, key))
}

/// Built-in default for a key, if it has one
fn default_value(key: &str) -> Result<Option<String>> {
    let defaults = toml::Value::try_from(Config::default())?;
    Ok(defaults.as_table().and_then(|t| lookup(t, key)))
}

fn lookup(table: &toml::Table, key: &str) -> Option<String> {
    let parts: Vec<&str> = key.split('.').collect();

    let val = match parts.as_slice() {
        [top] => table.get(*top),
        [section, field] => table.get(*section).and_then(|t| t.get(*field)),
        _ => None,
    };

    val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if let Ok(b) = s.parse::<bool>() {
        return b.into();
    }
    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }
    if let Ok(f) = s.parse::<f64>() {
        return f.into();
    }
    s.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value(&path, "llm.max_tokens", "256").unwrap();
        set_config_value(&path, "kb.numbering", "max-plus-one").unwrap();

        assert_eq!(get_config_value(&path, "llm.max_tokens").unwrap().as_deref(), Some("256"));
        assert_eq!(
            get_config_value(&path, "kb.numbering").unwrap().as_deref(),
            Some("max-plus-one")
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm.max_tokens, 256);
    }

    #[test]
    fn test_set_preserves_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# my settings\n[llm]\nmodel = \"tiny\"\n").unwrap();

        set_config_value(&path, "llm.temperature", "0.2").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# my settings"));
        assert!(content.contains("model = \"tiny\""));
        assert!(content.contains("temperature = 0.2"));
    }

    #[test]
    fn test_rejected_value_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let err = set_config_value(&path, "llm.max_tokens", "lots").unwrap_err();
        assert!(err.to_string().contains("not a valid setting"));
        assert!(set_config_value(&path, "kb.numbering", "sideways").is_err());

        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(Config::load_from(&path).unwrap().llm.max_tokens, 512);
    }

    #[test]
    fn test_rejected_value_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".rickskb").join("config.toml");

        assert!(set_config_value(&path, "llm.temperature", "warm").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_key_too_deep() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_config_value(&path, "a.b.c", "1").is_err());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_value("llm.max_tokens").unwrap().as_deref(), Some("512"));
        assert_eq!(
            default_value("kb.append_placement").unwrap().as_deref(),
            Some("next-number")
        );
        assert_eq!(default_value("llm.nope").unwrap(), None);
    }

    #[test]
    fn test_parse_toml_value_types() {
        assert_eq!(parse_toml_value("true").as_bool(), Some(true));
        assert_eq!(parse_toml_value("42").as_integer(), Some(42));
        assert_eq!(parse_toml_value("0.5").as_float(), Some(0.5));
        assert_eq!(parse_toml_value("hello").as_str(), Some("hello"));
    }
}
