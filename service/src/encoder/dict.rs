//! Dict cell micro-format
//!
//! A dict cell holds `|`-separated entries, each a comma-separated tuple
//! `key,v1[,v2,...]`:
//!
//! ```text
//! "1",10007,5|"2",10008
//! ```
//!
//! becomes
//!
//! ```text
//! {["1"]={10007,5},["2"]=10008,}
//! ```
//!
//! Tokens are spliced verbatim; keys are not checked for Lua validity.

use sheet2lua_core::prelude::*;
use std::fmt::Write;

/// Separator between dict entries
pub const ENTRY_SEPARATOR: char = '|';

/// Separator between the tokens of one entry
pub const TOKEN_SEPARATOR: char = ',';

/// Encode a dict cell for `field`
///
/// # Errors
///
/// Returns `Sheet2LuaError::MalformedDictCell` if any entry has fewer than
/// two tokens
pub fn encode_dict(field: &str, cell: &str) -> Result<String> {
    if cell.is_empty() {
        return Ok("{}".to_string());
    }

    let mut value = String::with_capacity(cell.len() + 16);
    value.push('{');
    for entry in cell.split(ENTRY_SEPARATOR) {
        let tokens: Vec<&str> = entry.split(TOKEN_SEPARATOR).collect();
        match tokens.as_slice() {
            [] | [_] => return Err(Sheet2LuaError::malformed_dict(field, cell)),
            [key, single] => write!(value, "[{key}]={single},")?,
            [key, rest @ ..] => write!(value, "[{key}]={{{}}},", rest.join(","))?,
        }
    }
    value.push('}');

    Ok(value)
}
