//! # sheet2lua core
//!
//! Types, errors and configuration shared by the sheet2lua compiler.
//!
//! A workbook sheet is described by a two-row header: field names, then
//! `type|audience` descriptors. The types here model that schema, the
//! entries compiled from data rows and the per-sheet output records.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types for sheet compilation
pub mod error;

/// Schema, entry and output record types
pub mod types;

/// Run configuration
pub mod config;

pub use config::{BooleanEncoding, EncodingConfig, LayoutConfig, OutputConfig, Sheet2LuaConfig};
pub use error::{Result, Sheet2LuaError};
pub use types::{
    Audience, AudienceFilter, EncodedEntry, FieldDescriptor, OutputRecord, RawRow, Schema,
    ValueType,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Result, Sheet2LuaError};
    pub use crate::types::*;
}
