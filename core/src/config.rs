//! Configuration types for sheet compilation

use crate::error::{Result, Sheet2LuaError};
use crate::types::AudienceFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a sheet2lua run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sheet2LuaConfig {
    /// Build target, shared by every sheet of the run
    pub audience: AudienceFilter,

    /// Sheet row and column layout
    pub layout: LayoutConfig,

    /// Value encoding policies
    pub encoding: EncodingConfig,

    /// Generated file settings
    pub output: OutputConfig,
}

impl Sheet2LuaConfig {
    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns `Sheet2LuaError::ConfigError` naming the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.layout.data_start_row < 2 {
            return Err(Sheet2LuaError::config(format!(
                "layout.data_start_row must be at least 2 (name and descriptor rows), got {}",
                self.layout.data_start_row
            )));
        }
        if self.output.extension.is_empty() || self.output.extension.contains('.') {
            return Err(Sheet2LuaError::config(format!(
                "output.extension must be a bare extension such as 'lua', got '{}'",
                self.output.extension
            )));
        }
        Ok(())
    }
}

/// Sheet layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// First data row (0-based); rows before it are headers and the sheet
    /// must have at least this many rows
    pub data_start_row: usize,

    /// Cells dropped from the end of every data row before compilation
    pub trailing_columns: usize,

    /// Skip data rows whose cells are all empty
    pub skip_blank_rows: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            data_start_row: 3,
            trailing_columns: 1,
            skip_blank_rows: true,
        }
    }
}

/// How `bool` cells become literals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanEncoding {
    /// `"1"` is `true`, anything else `false`
    #[default]
    OneIsTrue,
    /// Lower-cased cell text is emitted as the literal
    LowercaseLiteral,
}

/// Value encoding policies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Boolean policy
    pub boolean: BooleanEncoding,
}

/// Generated file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination directory
    pub dir: PathBuf,

    /// File extension, also shown in the preamble
    pub extension: String,

    /// Prefix put before the workbook file name in the preamble source label
    pub source_prefix: String,

    /// `@author` preamble line
    pub author: Option<String>,

    /// Copyright preamble line
    pub copyright: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            extension: "lua".to_string(),
            source_prefix: "excel/".to_string(),
            author: None,
            copyright: None,
        }
    }
}

impl OutputConfig {
    /// Preamble source label for a workbook file name
    #[must_use]
    pub fn source_label(&self, workbook_name: &str) -> String {
        format!("{}{workbook_name}", self.source_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Sheet2LuaConfig::default();
        assert_eq!(config.audience, AudienceFilter::Client);
        assert_eq!(config.layout.data_start_row, 3);
        assert_eq!(config.layout.trailing_columns, 1);
        assert_eq!(config.encoding.boolean, BooleanEncoding::OneIsTrue);
        assert_eq!(config.output.extension, "lua");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "audience: server\nencoding:\n  boolean: lowercase_literal\noutput:\n  author: tools\n";
        let config: Sheet2LuaConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.audience, AudienceFilter::Server);
        assert_eq!(config.encoding.boolean, BooleanEncoding::LowercaseLiteral);
        assert_eq!(config.output.author.as_deref(), Some("tools"));
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Sheet2LuaConfig::default();
        config.layout.data_start_row = 1;
        assert!(matches!(
            config.validate(),
            Err(Sheet2LuaError::ConfigError(_))
        ));

        let mut config = Sheet2LuaConfig::default();
        config.output.extension = ".lua".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_label() {
        let output = OutputConfig::default();
        assert_eq!(output.source_label("hero.xlsx"), "excel/hero.xlsx");
    }
}
