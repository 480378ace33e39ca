//! Value encoder
//!
//! Turns one raw cell into the Lua literal for its field. Empty cells are
//! replaced by a per-type default before encoding, so an empty dict still
//! goes through the dict encoder and yields `{}`.

pub mod dict;

pub use dict::encode_dict;

use sheet2lua_core::prelude::*;

/// Encodes cells according to their field's value type
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueEncoder {
    boolean: BooleanEncoding,
}

impl ValueEncoder {
    /// Create an encoder with the default policies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder from the encoding configuration
    #[must_use]
    pub fn from_config(config: &EncodingConfig) -> Self {
        Self {
            boolean: config.boolean,
        }
    }

    /// Set the boolean policy
    #[must_use]
    pub fn with_boolean(mut self, boolean: BooleanEncoding) -> Self {
        self.boolean = boolean;
        self
    }

    /// Literal for `cell` in `field`
    ///
    /// `comment` fields produce an empty string.
    ///
    /// # Errors
    ///
    /// Returns `Sheet2LuaError::UnknownFieldType` for unrecognised types and
    /// `Sheet2LuaError::MalformedDictCell` for bad dict entries
    pub fn encode(&self, field: &FieldDescriptor, cell: &str) -> Result<String> {
        let cell = if cell.is_empty() {
            default_value(field)?
        } else {
            cell
        };

        let value = match &field.value_type {
            ValueType::Bool => self.encode_bool(cell),
            ValueType::Int => cell.to_string(),
            ValueType::String => format!("\"{cell}\""),
            ValueType::Array => format!("{{{cell}}}"),
            ValueType::Dict => encode_dict(&field.name, cell)?,
            ValueType::Comment => String::new(),
            ValueType::Unknown(value_type) => {
                return Err(Sheet2LuaError::unknown_field_type(&field.name, value_type));
            }
        };

        Ok(value)
    }

    /// Annotated fragment `--[[name]]value,`, or `None` for comment fields
    ///
    /// # Errors
    ///
    /// Same as [`ValueEncoder::encode`]
    pub fn encode_fragment(&self, field: &FieldDescriptor, cell: &str) -> Result<Option<String>> {
        if field.is_comment() {
            return Ok(None);
        }
        let value = self.encode(field, cell)?;
        Ok(Some(format!("--[[{}]]{value},", field.name)))
    }

    fn encode_bool(&self, cell: &str) -> String {
        match self.boolean {
            BooleanEncoding::OneIsTrue => String::from(if cell == "1" { "true" } else { "false" }),
            BooleanEncoding::LowercaseLiteral => cell.to_lowercase(),
        }
    }
}

/// Substitute text for an empty cell
fn default_value(field: &FieldDescriptor) -> Result<&'static str> {
    match &field.value_type {
        ValueType::Bool => Ok("false"),
        ValueType::Int => Ok("0"),
        ValueType::String | ValueType::Array | ValueType::Dict | ValueType::Comment => Ok(""),
        ValueType::Unknown(value_type) => {
            Err(Sheet2LuaError::unknown_field_type(&field.name, value_type))
        }
    }
}
