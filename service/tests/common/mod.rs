//! Shared workbook fixtures for integration tests

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

/// Sheet used by most tests: mixed types, audiences and an annotation column
pub const HERO: &[&[&str]] = &[
    &["id", "name", "icon", "drop_rate", "alive", "drops", "note"],
    &[
        "int|unique",
        "string",
        "string|client",
        "int|server",
        "bool",
        "dict",
        "comment",
    ],
    &["ID", "Name", "Icon", "Drop", "Alive", "Drops", "Note"],
    &[
        "1",
        "Sword",
        "a.png",
        "30",
        "1",
        "\"1\",10007,5|\"2\",10008",
        "starter",
        "X",
    ],
    &["2", "Shield", "b.png", "", "0", "", "", "X"],
];

/// Sheet too short to carry a header
pub const NOTES: &[&[&str]] = &[&["free text"]];

/// Sheet whose only data row has a malformed dict cell
pub const BROKEN: &[&[&str]] = &[
    &["id", "loot"],
    &["int", "dict"],
    &["ID", "Loot"],
    &["1", "\"a\"", "X"],
];

/// Sheet whose annotation column is mostly blank
pub const ROSTER: &[&[&str]] = &[
    &["id", "hp", "title"],
    &["int", "int", "string"],
    &["ID", "HP", "Title"],
    &["1", "100", "Knight", "X"],
    &["2", "200", "Mage"],
    &["3", "", ""],
    &["", "", "", "annotation only"],
];

/// Client build entries of [`ROSTER`]
pub const ROSTER_ENTRIES: &str = "  {--[[id]]1,--[[hp]]100,--[[title]]\"Knight\",},
  {--[[id]]2,--[[hp]]200,--[[title]]\"Mage\",},
  {--[[id]]3,--[[hp]]0,--[[title]]\"\",},
  {--[[id]]0,--[[hp]]0,--[[title]]\"\",},
";

/// Client build of [`HERO`]
pub const HERO_CLIENT_LUA: &str = "--[[
* @file        : hero.lua
* @sour        : excel/config.xlsx
* @sheet name  : hero
* brief:       : this file was create by tools, DO NOT modify it!
--]]

local HERO =
{
  {--[[id]]1,--[[name]]\"Sword\",--[[icon]]\"a.png\",--[[alive]]true,--[[drops]]{[\"1\"]={10007,5},[\"2\"]=10008,},},
  {--[[id]]2,--[[name]]\"Shield\",--[[icon]]\"b.png\",--[[alive]]false,--[[drops]]{},},
};
return HERO
";

/// Write a workbook with one worksheet per `(name, rows)` pair
///
/// Numeric text is stored as a number cell and empty text is left blank,
/// the way a spreadsheet editor would save it.
pub fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let row_number = u32::try_from(row_index).expect("row index fits u32");
                let col_number = u16::try_from(col_index).expect("column index fits u16");
                if cell.is_empty() {
                    continue;
                }
                if let Ok(number) = cell.parse::<f64>() {
                    worksheet.write_number(row_number, col_number, number)?;
                } else {
                    worksheet.write_string(row_number, col_number, *cell)?;
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// Rows as owned text
pub fn owned(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}
