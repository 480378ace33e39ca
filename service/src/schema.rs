//! Field schema parser
//!
//! Turns the two header rows of a sheet into a [`Schema`]:
//!
//! ```text
//! | id         | name   | drops             | note    |
//! | int|unique | string | dict|server       | comment |
//! ```
//!
//! Each descriptor cell is split on `|`. Segment 0 is the value type and
//! segment 1, when present, is the audience attribute. Type names are not
//! checked here; an unknown type only fails once a cell of that column is
//! encoded.

use sheet2lua_core::prelude::*;
use tracing::debug;

/// Separator between the type and the audience in a descriptor cell
pub const DESCRIPTOR_SEPARATOR: char = '|';

/// Parse aligned name and descriptor rows
///
/// # Errors
///
/// Returns `Sheet2LuaError::SchemaMismatch` if the rows differ in length
pub fn parse_schema<N, D>(names: &[N], descriptors: &[D]) -> Result<Schema>
where
    N: AsRef<str>,
    D: AsRef<str>,
{
    if names.len() != descriptors.len() {
        return Err(Sheet2LuaError::schema_mismatch(
            names.len(),
            descriptors.len(),
        ));
    }

    let fields = names
        .iter()
        .zip(descriptors)
        .enumerate()
        .map(|(index, (name, descriptor))| parse_field(index, name.as_ref(), descriptor.as_ref()))
        .collect::<Vec<_>>();

    debug!("Parsed schema with {} fields", fields.len());
    Ok(Schema::new(fields))
}

/// Parse one column's header cells
#[must_use]
pub fn parse_field(index: usize, name: &str, descriptor: &str) -> FieldDescriptor {
    let mut segments = descriptor.split(DESCRIPTOR_SEPARATOR);
    let value_type = ValueType::parse(segments.next().unwrap_or_default().trim());
    let audience = segments
        .next()
        .map_or(Audience::None, |attr| Audience::parse(attr.trim()));

    FieldDescriptor::new(index, name.trim(), value_type, audience)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_schema() {
        let names = [" id ", "name", "drops", "note"];
        let descriptors = ["int|unique", "string", " dict | server ", "comment"];

        let schema = parse_schema(&names, &descriptors).unwrap();
        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema.get(0),
            Some(&FieldDescriptor::new(0, "id", ValueType::Int, Audience::Unique))
        );
        assert_eq!(schema.get(1).unwrap().audience, Audience::None);
        assert_eq!(schema.get(2).unwrap().value_type, ValueType::Dict);
        assert_eq!(schema.get(2).unwrap().audience, Audience::Server);
        assert!(schema.get(3).unwrap().is_comment());

        for (position, field) in schema.iter().enumerate() {
            assert_eq!(field.index, position);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = parse_schema(&["id", "hp"], &["int"]).unwrap_err();
        assert!(matches!(
            err,
            Sheet2LuaError::SchemaMismatch {
                names: 2,
                descriptors: 1
            }
        ));
    }

    #[test]
    fn test_unknown_type_is_accepted() {
        let schema = parse_schema(&["speed"], &["float|client"]).unwrap();
        let field = schema.get(0).unwrap();
        assert_eq!(field.value_type, ValueType::Unknown("float".to_string()));
        assert_eq!(field.audience, Audience::Client);
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let field = parse_field(0, "hp", "int|server|legacy");
        assert_eq!(field.value_type, ValueType::Int);
        assert_eq!(field.audience, Audience::Server);
    }

    #[test]
    fn test_empty_header() {
        let schema = parse_schema::<&str, &str>(&[], &[]).unwrap();
        assert!(schema.is_empty());
    }
}
