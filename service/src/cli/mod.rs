//! Command-line interface for sheet2lua.

mod app;
mod types;

pub use app::{ConvertOptions, SheetSchema, Sheet2LuaApp, sheet_schemas};
pub use types::{AudienceArg, ReportFormat, Sheet2LuaCli, Sheet2LuaCommand};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails
pub async fn run() -> sheet2lua_core::Result<()> {
    Sheet2LuaApp::from_args().run().await
}
