//! Row and sheet compilers

pub mod row;
pub mod sheet;

pub use row::RowCompiler;
pub use sheet::{DESCRIPTOR_ROW, NAME_ROW, SheetCompiler};
