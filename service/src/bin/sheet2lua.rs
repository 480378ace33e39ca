//! `sheet2lua` command-line interface
//!
//! Compiles the sheets of an xlsx workbook into Lua data-table files.

use sheet2lua_service::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Errors are already reported by the app
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
