// Configuration loading and parsing (groupstage.toml).
//
// The file is optional: without it every setting takes its default, and the
// program output is exactly the standings listings plus the pairings.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "groupstage.toml";

/// EnvFilter directive used when neither the config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_FILTER: &str = "groupstage=warn,groupstage_core=warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Write the per-group standings listing ahead of each pairing block.
    pub standings: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { standings: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// tracing EnvFilter directive. `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// Log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load `groupstage.toml` from `base_dir`, falling back to defaults when the
/// file does not exist.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
        path: path.clone(),
        source,
    })?;
    parse_config(&text, &path)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::ReadError {
        path: PathBuf::from("."),
        source,
    })?;
    load_config_from(&cwd)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(file) = &config.logging.file {
        if file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "logging.file".into(),
                message: "must not be an empty path".into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = scratch_dir("groupstage_config_test_missing");
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.output.standings);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.logging.file.is_none());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn loads_full_file() {
        let tmp = scratch_dir("groupstage_config_test_full");
        fs::write(
            tmp.join(CONFIG_FILE_NAME),
            r#"
[output]
standings = false

[logging]
filter = "groupstage_core=debug"
file = "logs/groupstage.log"
"#,
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert!(!config.output.standings);
        assert_eq!(config.logging.filter, "groupstage_core=debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("logs/groupstage.log")));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config("[output]\nstandings = false\n", Path::new("t.toml")).unwrap();
        assert!(!config.output.standings);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("", Path::new("t.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("[output]\ncolour = true\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = parse_config("[output]\nstandings = \"yes\"\n", Path::new("t.toml")).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, PathBuf::from("t.toml")),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn empty_filter_fails_validation() {
        let err = parse_config("[logging]\nfilter = \"  \"\n", Path::new("t.toml")).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "logging.filter"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn empty_log_file_fails_validation() {
        let err = parse_config("[logging]\nfile = \"\"\n", Path::new("t.toml")).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "logging.file"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }
}
