//! Error types for sheet compilation

use thiserror::Error;

/// Main error type for sheet2lua operations
#[derive(Error, Debug)]
pub enum Sheet2LuaError {
    /// Name row and descriptor row have different lengths
    #[error("Schema mismatch: {names} field names but {descriptors} field descriptors")]
    SchemaMismatch {
        /// Number of cells in the name row
        names: usize,
        /// Number of cells in the descriptor row
        descriptors: usize,
    },

    /// Sheet has fewer rows than the header layout requires
    #[error("Invalid header in sheet '{sheet}': found {rows} rows, at least {required} required")]
    InvalidHeader {
        /// Sheet name
        sheet: String,
        /// Rows present
        rows: usize,
        /// Rows required before data begins
        required: usize,
    },

    /// Descriptor names a type the encoder does not know
    #[error("Unknown field type '{value_type}' for field '{field}'")]
    UnknownFieldType {
        /// Field display name
        field: String,
        /// Raw type text from the descriptor row
        value_type: String,
    },

    /// Dict entry without a value
    #[error("Invalid dict format in field '{field}': {cell}")]
    MalformedDictCell {
        /// Field display name
        field: String,
        /// Full offending cell text
        cell: String,
    },

    /// Row carries more cells than the schema has columns
    #[error("Field index {index} out of range for schema with {len} fields (row has {width} cells)")]
    FieldIndexOutOfRange {
        /// First column index beyond the schema
        index: usize,
        /// Schema length
        len: usize,
        /// Cells in the offending row
        width: usize,
    },

    /// Row context for an error raised while compiling a data row
    #[error("row {row}: {source}")]
    AtRow {
        /// 1-based spreadsheet row number
        row: usize,
        /// Underlying error
        #[source]
        source: Box<Sheet2LuaError>,
    },

    /// Workbook container could not be opened or read
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A sheet worker stopped without producing a result
    #[error("Sheet worker failed: {0}")]
    Worker(String),

    /// Text formatting errors while building output
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Strict run with failed sheets
    #[error("{failed} of {total} sheets failed to compile")]
    SheetsFailed {
        /// Failed sheets
        failed: usize,
        /// Sheets in the run
        total: usize,
    },
}

/// Result type alias for sheet2lua operations
pub type Result<T> = std::result::Result<T, Sheet2LuaError>;

impl Sheet2LuaError {
    /// Create a schema mismatch error
    #[must_use]
    pub fn schema_mismatch(names: usize, descriptors: usize) -> Self {
        Self::SchemaMismatch { names, descriptors }
    }

    /// Create an invalid header error
    #[must_use]
    pub fn invalid_header(sheet: impl Into<String>, rows: usize, required: usize) -> Self {
        Self::InvalidHeader {
            sheet: sheet.into(),
            rows,
            required,
        }
    }

    /// Create an unknown field type error
    #[must_use]
    pub fn unknown_field_type(field: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::UnknownFieldType {
            field: field.into(),
            value_type: value_type.into(),
        }
    }

    /// Create a malformed dict cell error
    #[must_use]
    pub fn malformed_dict(field: impl Into<String>, cell: impl Into<String>) -> Self {
        Self::MalformedDictCell {
            field: field.into(),
            cell: cell.into(),
        }
    }

    /// Create a workbook error
    #[must_use]
    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook(message.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a worker error
    #[must_use]
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker(message.into())
    }

    /// Attach a 1-based spreadsheet row number
    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        Self::AtRow {
            row,
            source: Box::new(self),
        }
    }

    /// The error with any row context removed
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::AtRow { source, .. } => source.root(),
            other => other,
        }
    }

    /// Spreadsheet row the error was raised on, if any
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::AtRow { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Stable name of the root variant, used in run reports
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.root() {
            Self::SchemaMismatch { .. } => "SchemaMismatch",
            Self::InvalidHeader { .. } => "InvalidHeader",
            Self::UnknownFieldType { .. } => "UnknownFieldType",
            Self::MalformedDictCell { .. } => "MalformedDictCell",
            Self::FieldIndexOutOfRange { .. } => "FieldIndexOutOfRange",
            Self::AtRow { .. } => "AtRow",
            Self::Workbook(_) => "Workbook",
            Self::ConfigError(_) => "ConfigError",
            Self::IoError(_) => "IoError",
            Self::SerializationError(_) => "SerializationError",
            Self::Worker(_) => "Worker",
            Self::Format(_) => "Format",
            Self::SheetsFailed { .. } => "SheetsFailed",
        }
    }

    /// Whether the error must stop the whole run instead of one sheet
    #[must_use]
    pub fn is_run_fatal(&self) -> bool {
        matches!(self.root(), Self::IoError(_) | Self::Workbook(_))
    }
}

impl From<serde_json::Error> for Sheet2LuaError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Sheet2LuaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
