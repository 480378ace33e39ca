//! Sheet compiler
//!
//! Drives schema parsing and row compilation over one sheet and assembles
//! the generated Lua source:
//!
//! ```text
//! --[[
//! * @file        : hero.lua
//! * @sour        : excel/config.xlsx
//! * @sheet name  : hero
//! * brief:       : this file was create by tools, DO NOT modify it!
//! --]]
//!
//! local HERO =
//! {
//!   {--[[id]]1,--[[hp]]100,},
//! };
//! return HERO
//! ```

use super::row::RowCompiler;
use crate::encoder::ValueEncoder;
use crate::schema::parse_schema;
use sheet2lua_core::prelude::*;
use std::fmt::Write;
use tracing::debug;

/// Row holding field names
pub const NAME_ROW: usize = 0;

/// Row holding `type|audience` descriptors
pub const DESCRIPTOR_ROW: usize = 1;

/// Compiles whole sheets into output records
#[derive(Debug, Clone)]
pub struct SheetCompiler {
    rows: RowCompiler,
    layout: LayoutConfig,
    output: OutputConfig,
}

impl Default for SheetCompiler {
    fn default() -> Self {
        Self::from_config(&Sheet2LuaConfig::default())
    }
}

impl SheetCompiler {
    /// Create a sheet compiler from the run configuration
    #[must_use]
    pub fn from_config(config: &Sheet2LuaConfig) -> Self {
        Self {
            rows: RowCompiler::new(ValueEncoder::from_config(&config.encoding)),
            layout: config.layout.clone(),
            output: config.output.clone(),
        }
    }

    /// Layout this compiler reads sheets with
    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Compile one sheet
    ///
    /// # Errors
    ///
    /// Returns `Sheet2LuaError::InvalidHeader` if the sheet is shorter than
    /// the header layout, `Sheet2LuaError::SchemaMismatch` for misaligned
    /// header rows, and row errors wrapped in `Sheet2LuaError::AtRow`
    pub fn compile_sheet<C: AsRef<str>>(
        &self,
        sheet_name: &str,
        source_label: &str,
        rows: &[Vec<C>],
        filter: AudienceFilter,
    ) -> Result<OutputRecord> {
        let required = self.layout.data_start_row;
        if rows.len() < required {
            return Err(Sheet2LuaError::invalid_header(sheet_name, rows.len(), required));
        }

        let schema = parse_schema(&rows[NAME_ROW], &rows[DESCRIPTOR_ROW])?;
        debug!(
            "Sheet '{}': {} fields, {} data rows, {} build",
            sheet_name,
            schema.len(),
            rows.len() - required,
            filter
        );

        let identifier = sheet_name.to_uppercase();
        let mut body = String::new();
        self.write_preamble(&mut body, sheet_name, source_label)?;
        write!(body, "\n\nlocal {identifier} =\n{{\n")?;

        for (row_index, row) in rows.iter().enumerate().skip(required) {
            if self.layout.skip_blank_rows && row.iter().all(|cell| cell.as_ref().is_empty()) {
                debug!("Sheet '{}': skipping blank row {}", sheet_name, row_index + 1);
                continue;
            }

            let cells = &row[..self.data_width(row.len(), schema.len())];
            let entry = self
                .rows
                .compile_row(&schema, cells, filter)
                .map_err(|e| e.at_row(row_index + 1))?;
            writeln!(body, "  {entry}")?;
        }

        write!(body, "}};\nreturn {identifier}\n")?;

        Ok(OutputRecord::new(sheet_name, body))
    }

    /// Cells of a data row that hold field values
    ///
    /// Trailing columns sit right after the schema columns. Rows come in
    /// trimmed of trailing empty cells, so the drop is measured from the
    /// schema width: a row no wider than the schema keeps every cell and the
    /// missing ones read as empty. A row wider than schema plus trailing
    /// columns keeps its extra cells so the row compiler rejects it.
    fn data_width(&self, row_len: usize, schema_len: usize) -> usize {
        let full_width = schema_len + self.layout.trailing_columns;
        if row_len > full_width {
            row_len - self.layout.trailing_columns
        } else {
            row_len.min(schema_len)
        }
    }

    fn write_preamble(&self, out: &mut String, sheet_name: &str, source_label: &str) -> Result<()> {
        writeln!(out, "--[[")?;
        writeln!(out, "* @file        : {sheet_name}.{}", self.output.extension)?;
        if let Some(author) = &self.output.author {
            writeln!(out, "* @author      : {author}")?;
        }
        writeln!(out, "* @sour        : {source_label}")?;
        writeln!(out, "* @sheet name  : {sheet_name}")?;
        writeln!(
            out,
            "* brief:       : this file was create by tools, DO NOT modify it!"
        )?;
        if let Some(copyright) = &self.output.copyright {
            writeln!(out, "* {copyright}")?;
        }
        write!(out, "--]]")?;
        Ok(())
    }
}
