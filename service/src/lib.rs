//! # sheet2lua service
//!
//! Compiles spreadsheet game-data tables into Lua source files.
//!
//! Every sheet of a workbook is read as rows of text cells. Row 0 names the
//! fields, row 1 describes them as `type|audience` and the rows from
//! `layout.data_start_row` on are data. Each data row becomes a Lua table
//! entry:
//!
//! ```text
//! {--[[id]]1,--[[hp]]100,},
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sheet2lua_service::compiler::SheetCompiler;
//! use sheet2lua_core::AudienceFilter;
//!
//! let rows = vec![
//!     vec!["id", "hp"],
//!     vec!["int", "int"],
//!     vec!["ID", "HP"],
//!     vec!["1", "100", "note"],
//! ];
//! let record = SheetCompiler::default()
//!     .compile_sheet("hero", "excel/config.xlsx", &rows, AudienceFilter::Client)
//!     .unwrap();
//! assert!(record.body.contains("{--[[id]]1,--[[hp]]100,},"));
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: header rows to field descriptors
//! - [`encoder`]: cell text to Lua literals, including the dict micro-format
//! - [`compiler`]: row and sheet compilation
//! - [`batch`]: concurrent compilation of a whole workbook
//! - [`workbook`]: xlsx reading via `calamine`
//! - [`output`]: file and stdout sinks
//! - [`config`]: YAML configuration loading
//! - [`cli`]: the `sheet2lua` binary

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod encoder;
pub mod output;
pub mod schema;
pub mod workbook;

pub use batch::{RunReport, SheetInput, SheetOutcome, SheetReport, SheetSummary, compile_all};
pub use compiler::{RowCompiler, SheetCompiler};
pub use config::{load_config, parse_config};
pub use encoder::{ValueEncoder, encode_dict};
pub use output::{DirectorySink, OutputSink, StdoutSink, write_records};
pub use schema::{parse_field, parse_schema};
pub use workbook::{SheetData, read_workbook};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::{RunReport, SheetInput, SheetOutcome, compile_all};
    pub use crate::compiler::{RowCompiler, SheetCompiler};
    pub use crate::encoder::ValueEncoder;
    pub use crate::output::{DirectorySink, OutputSink, StdoutSink};
    pub use sheet2lua_core::prelude::*;
}
