//! Row compiler

use crate::encoder::ValueEncoder;
use sheet2lua_core::prelude::*;

/// Compiles data rows against a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCompiler {
    encoder: ValueEncoder,
}

impl RowCompiler {
    /// Create a row compiler around an encoder
    #[must_use]
    pub fn new(encoder: ValueEncoder) -> Self {
        Self { encoder }
    }

    /// Compile one data row
    ///
    /// Columns are visited in schema order. Cells missing from a short row
    /// count as empty. Comment columns and columns tagged for the other
    /// audience produce nothing.
    ///
    /// # Errors
    ///
    /// Returns `Sheet2LuaError::FieldIndexOutOfRange` if the row is longer
    /// than the schema, or any encoder error
    pub fn compile_row<C: AsRef<str>>(
        &self,
        schema: &Schema,
        row: &[C],
        filter: AudienceFilter,
    ) -> Result<EncodedEntry> {
        if row.len() > schema.len() {
            return Err(Sheet2LuaError::FieldIndexOutOfRange {
                index: schema.len(),
                len: schema.len(),
                width: row.len(),
            });
        }

        let mut entry = EncodedEntry::new();
        for field in schema {
            if !filter.includes(&field.audience) {
                continue;
            }
            let cell = row.get(field.index).map_or("", |cell| cell.as_ref());
            if let Some(fragment) = self.encoder.encode_fragment(field, cell)? {
                entry.push(fragment);
            }
        }

        Ok(entry)
    }
}
