#![cfg(not(tarpaulin_include))]

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::error::Error;
use std::path::Path;

/// Extract the roll numbers enrolled in a subject from an Excel file
///
/// Reads the first worksheet only. The first row is treated as the header
/// row; a data row matches the subject when any of its numeric cells equals
/// the integer subject code, and the roll is read from the column whose
/// header is `roll`. Rows with no roll value contribute nothing.
///
/// A workbook with no matching rows yields an empty list, not an error.
///
/// # Arguments
/// * `filepath` - Path to the uploaded XLSX file
/// * `subject_code` - Integer subject code to match against row values
///
/// # Returns
/// * `Result<Vec<String>, Box<dyn Error>>` - Matching rolls in sheet order
pub fn rolls_for_subject(
    filepath: impl AsRef<Path>,
    subject_code: i64,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut workbook: Xlsx<_> = open_workbook(filepath)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err("No sheets found in Excel file".into()),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(headers) => headers,
        None => return Ok(Vec::new()),
    };

    // Column carrying the roll number, per the header row
    let roll_col = headers
        .iter()
        .position(|cell| cell.to_string().trim() == "roll");

    let mut rolls = Vec::new();
    for row in rows {
        if !row.iter().any(|cell| cell_matches(cell, subject_code)) {
            continue;
        }

        let Some(col) = roll_col else {
            continue;
        };
        if let Some(roll) = row.get(col).and_then(roll_text) {
            rolls.push(roll);
        }
    }

    Ok(rolls)
}

// Numeric equality against the subject code. String cells never match, so a
// sheet where codes were typed as text matches nothing.
fn cell_matches(cell: &Data, subject_code: i64) -> bool {
    match cell {
        Data::Int(i) => *i == subject_code,
        Data::Float(f) => *f == subject_code as f64,
        _ => false,
    }
}

// Roll cells are usually numeric in the sheet; render them without a
// trailing ".0" so "101" stays "101".
fn roll_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}
