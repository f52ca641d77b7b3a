use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    default_required_fields, DEFAULT_OUTPUT_PATH, DEFAULT_SHEET_NAME, DEFAULT_SOURCE_PATH,
    DEFAULT_TEXT_ENCODING,
};
use crate::error::{ConvertError, Result};
use crate::types::Field;

/// Resolved converter configuration. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConverterConfig {
    pub source_path: PathBuf,
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub required_fields: Vec<String>,
    pub text_encoding: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            required_fields: default_required_fields(),
            text_encoding: DEFAULT_TEXT_ENCODING.to_string(),
        }
    }
}

/// Caller-supplied overrides. Every key is optional; a present key wins over
/// the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub source_path: Option<PathBuf>,
    pub sheet_name: Option<String>,
    pub output_path: Option<PathBuf>,
    pub required_fields: Option<Vec<String>>,
    pub text_encoding: Option<String>,
}

impl ConfigOverrides {
    /// Parse overrides from TOML text whose top-level keys are option names
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e| ConvertError::Config(format!("Invalid configuration TOML: {}", e)))?;

        if let Some(value) = table.get("required_fields") {
            if !value.is_array() {
                return Err(ConvertError::Config("required_fields must be a list".to_string()));
            }
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| ConvertError::Config(format!("Invalid configuration value: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Layer `other` on top of `self`; keys set in `other` win
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            source_path: other.source_path.or(self.source_path),
            sheet_name: other.sheet_name.or(self.sheet_name),
            output_path: other.output_path.or(self.output_path),
            required_fields: other.required_fields.or(self.required_fields),
            text_encoding: other.text_encoding.or(self.text_encoding),
        }
    }
}

impl ConverterConfig {
    /// Merge overrides onto the defaults and validate the result
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            source_path: overrides.source_path.unwrap_or(defaults.source_path),
            sheet_name: overrides.sheet_name.unwrap_or(defaults.sheet_name),
            output_path: overrides.output_path.unwrap_or(defaults.output_path),
            required_fields: overrides.required_fields.unwrap_or(defaults.required_fields),
            text_encoding: overrides.text_encoding.unwrap_or(defaults.text_encoding),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants and return the output encoding.
    /// A key that was cleared to an empty value counts as missing.
    pub fn validate(&self) -> Result<&'static Encoding> {
        let missing = |key: &str| {
            ConvertError::Config(format!("Missing required configuration key: {}", key))
        };

        if self.source_path.as_os_str().is_empty() {
            return Err(missing("source_path"));
        }
        if self.sheet_name.trim().is_empty() {
            return Err(missing("sheet_name"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(missing("output_path"));
        }
        if self.required_fields.is_empty() {
            return Err(missing("required_fields"));
        }

        let absent: Vec<&str> = Field::ALL
            .iter()
            .map(|field| field.as_str())
            .filter(|name| !self.required_fields.iter().any(|f| f == name))
            .collect();
        if !absent.is_empty() {
            return Err(ConvertError::Config(format!(
                "required_fields must include {:?}",
                absent
            )));
        }

        let encoding = Encoding::for_label(self.text_encoding.trim().as_bytes()).ok_or_else(|| {
            ConvertError::Config(format!("Unknown text encoding: {:?}", self.text_encoding))
        })?;
        // UTF-16 has its own writer; any other label that encodes as something
        // else (only "replacement" does) cannot honour the setting
        let utf16 = encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE;
        if !utf16 && encoding.output_encoding() != encoding {
            return Err(ConvertError::Config(format!(
                "Text encoding {:?} cannot be used for output",
                self.text_encoding
            )));
        }
        Ok(encoding)
    }
}
