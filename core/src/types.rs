//! Type definitions for sheet schemas, compiled entries and output records

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Value type named in segment 0 of a field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `string`
    String,
    /// `array`
    Array,
    /// `dict`
    Dict,
    /// `comment`, documentation only
    Comment,
    /// Any other descriptor text, rejected when a cell is encoded
    Unknown(String),
}

impl ValueType {
    /// Classify trimmed descriptor text
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "string" => Self::String,
            "array" => Self::Array,
            "dict" => Self::Dict,
            "comment" => Self::Comment,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Descriptor spelling of this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::Array => "array",
            Self::Dict => "dict",
            Self::Comment => "comment",
            Self::Unknown(text) => text,
        }
    }

    /// Whether this is one of the six recognised kinds
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Target-audience attribute named in segment 1 of a field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Audience {
    /// No attribute
    #[default]
    None,
    /// `unique`
    Unique,
    /// `client`, dropped from server builds
    Client,
    /// `server`, dropped from client builds
    Server,
    /// Unrecognised attribute text, emitted under both filters
    Other(String),
}

impl Audience {
    /// Classify trimmed attribute text
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "" | "nil" | "none" => Self::None,
            "unique" => Self::Unique,
            "client" => Self::Client,
            "server" => Self::Server,
            other => Self::Other(other.to_string()),
        }
    }

    /// Attribute spelling
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Unique => "unique",
            Self::Client => "client",
            Self::Server => "server",
            Self::Other(text) => text,
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Run-wide build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceFilter {
    /// Client build
    #[default]
    Client,
    /// Server build
    Server,
}

impl AudienceFilter {
    /// Whether a field with `audience` belongs in this build
    #[must_use]
    pub fn includes(self, audience: &Audience) -> bool {
        !matches!(
            (self, audience),
            (Self::Server, Audience::Client) | (Self::Client, Audience::Server)
        )
    }
}

impl fmt::Display for AudienceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => f.write_str("client"),
            Self::Server => f.write_str("server"),
        }
    }
}

/// One column of a sheet schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// 0-based column position
    pub index: usize,
    /// Trimmed display name
    pub name: String,
    /// Value type
    pub value_type: ValueType,
    /// Target audience
    pub audience: Audience,
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(
        index: usize,
        name: impl Into<String>,
        value_type: ValueType,
        audience: Audience,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            value_type,
            audience,
        }
    }

    /// Comment columns never reach the output
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.value_type == ValueType::Comment
    }
}

/// Ordered field descriptors, one per header column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Wrap descriptors already ordered by column index
    #[must_use]
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptor for a column
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Descriptors in column order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Descriptors as a slice
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Text cells of one spreadsheet row
pub type RawRow = Vec<String>;

/// Compiled literal for one data row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedEntry {
    fragments: Vec<String>,
}

impl EncodedEntry {
    /// Create an empty entry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `--[[name]]value,` fragment
    pub fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Fragments in column order
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Entry literal, `{...},`
    #[must_use]
    pub fn literal(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EncodedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for fragment in &self.fragments {
            f.write_str(fragment)?;
        }
        f.write_str("},")
    }
}

/// Generated source for one sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// Sheet name, used to choose the destination
    pub name: String,
    /// Complete generated text
    pub body: String,
}

impl OutputRecord {
    /// Create a new output record
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Destination file name for an extension
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_parse() {
        assert_eq!(ValueType::parse("dict"), ValueType::Dict);
        assert_eq!(ValueType::parse("comment"), ValueType::Comment);
        assert_eq!(
            ValueType::parse("float"),
            ValueType::Unknown("float".to_string())
        );
        assert!(!ValueType::parse("").is_known());
        assert_eq!(ValueType::parse("float").to_string(), "float");
    }

    #[test]
    fn test_audience_parse() {
        assert_eq!(Audience::parse(""), Audience::None);
        assert_eq!(Audience::parse("nil"), Audience::None);
        assert_eq!(Audience::parse("unique"), Audience::Unique);
        assert_eq!(Audience::parse("server"), Audience::Server);
        assert_eq!(Audience::parse("both"), Audience::Other("both".to_string()));
    }

    #[test]
    fn test_audience_filter() {
        assert!(AudienceFilter::Client.includes(&Audience::Client));
        assert!(!AudienceFilter::Client.includes(&Audience::Server));
        assert!(AudienceFilter::Server.includes(&Audience::Server));
        assert!(!AudienceFilter::Server.includes(&Audience::Client));

        for filter in [AudienceFilter::Client, AudienceFilter::Server] {
            assert!(filter.includes(&Audience::None));
            assert!(filter.includes(&Audience::Unique));
            assert!(filter.includes(&Audience::Other("x".to_string())));
        }
    }

    #[test]
    fn test_entry_literal() {
        let mut entry = EncodedEntry::new();
        assert_eq!(entry.literal(), "{},");

        entry.push("--[[id]]1,".to_string());
        entry.push("--[[hp]]100,".to_string());
        assert_eq!(entry.literal(), "{--[[id]]1,--[[hp]]100,},");
    }

    #[test]
    fn test_schema_serializes_as_list() {
        let schema = Schema::new(vec![FieldDescriptor::new(
            0,
            "id",
            ValueType::Int,
            Audience::Unique,
        )]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"index": 0, "name": "id", "value_type": "int", "audience": "unique"}])
        );
    }
}
