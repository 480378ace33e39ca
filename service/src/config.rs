//! Configuration loading
//!
//! Reads a YAML file with `${VAR:-default}` environment substitution into
//! a [`Sheet2LuaConfig`]. Missing sections fall back to their defaults.

use regex::{Captures, Regex};
use sheet2lua_core::prelude::*;
use std::env;
use std::path::Path;
use tracing::debug;

/// Load and validate a configuration file
///
/// # Errors
///
/// Returns `Sheet2LuaError::IoError` if the file cannot be read
/// Returns `Sheet2LuaError::ConfigError` if the YAML cannot be parsed or the
/// values are invalid
pub fn load_config(path: &Path) -> Result<Sheet2LuaConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse and validate configuration text
///
/// # Errors
///
/// Returns `Sheet2LuaError::ConfigError` if the YAML cannot be parsed or the
/// values are invalid
pub fn parse_config(contents: &str) -> Result<Sheet2LuaConfig> {
    let substituted = substitute_env_vars(contents)?;
    let config: Sheet2LuaConfig = if substituted.trim().is_empty() {
        Sheet2LuaConfig::default()
    } else {
        serde_yaml::from_str(&substituted)
            .map_err(|e| Sheet2LuaError::config(format!("Failed to parse YAML config: {e}")))?
    };
    config.validate()?;
    Ok(config)
}

/// Substitute environment variables in the format ${VAR:-default}
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}")
        .map_err(|e| Sheet2LuaError::config(format!("Invalid substitution pattern: {e}")))?;

    Ok(re
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(3).map_or("", |m| m.as_str());
            env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("audience: server\nlayout:\n  trailing_columns: 0\n").unwrap();
        assert_eq!(config.audience, AudienceFilter::Server);
        assert_eq!(config.layout.trailing_columns, 0);
        assert_eq!(config.layout.data_start_row, 3);
        assert_eq!(config.output.extension, "lua");
    }

    #[test]
    fn test_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.audience, AudienceFilter::Client);
    }

    #[test]
    fn test_env_default_is_used_when_unset() {
        let config =
            parse_config("output:\n  author: ${SHEET2LUA_TEST_UNSET_AUTHOR:-tools}\n").unwrap();
        assert_eq!(config.output.author.as_deref(), Some("tools"));
    }

    #[test]
    fn test_boolean_encoding() {
        let config = parse_config("encoding:\n  boolean: lowercase_literal\n").unwrap();
        assert_eq!(config.encoding.boolean, BooleanEncoding::LowercaseLiteral);
    }

    #[test]
    fn test_invalid_values() {
        let err = parse_config("layout:\n  data_start_row: 1\n").unwrap_err();
        assert!(matches!(err, Sheet2LuaError::ConfigError(_)));

        let err = parse_config("audience: [client").unwrap_err();
        assert!(matches!(err, Sheet2LuaError::ConfigError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output:\n  dir: generated\n  source_prefix: data/").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output.dir, std::path::PathBuf::from("generated"));
        assert_eq!(config.output.source_label("a.xlsx"), "data/a.xlsx");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("no/such/config.yaml")).unwrap_err();
        assert!(matches!(err, Sheet2LuaError::IoError(_)));
    }
}
