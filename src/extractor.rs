use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse spreadsheet")]
    Spreadsheet(#[from] calamine::Error),
    #[error("The workbook does not contain any sheets")]
    NoSheets,
    #[error("Expected text cells only, found `{0}`")]
    NonStringCell(String),
}

/// Pull candidate addresses out of an uploaded contact list.
///
/// `csv`/`txt` files are split on line boundaries; `xls`/`xlsx` workbooks are
/// flattened cell by cell, first sheet only. A candidate is any trimmed value
/// containing `@`. Unknown extensions produce an empty list.
pub fn extract(file_bytes: &[u8], extension: &str) -> Result<Vec<String>, ExtractError> {
    match extension.to_ascii_lowercase().as_str() {
        "csv" | "txt" => Ok(extract_from_text(file_bytes)),
        "xls" | "xlsx" => extract_from_workbook(file_bytes),
        _ => Ok(Vec::new()),
    }
}

fn extract_from_text(file_bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(file_bytes)
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('@'))
        .map(ToOwned::to_owned)
        .collect()
}

fn extract_from_workbook(file_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(file_bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ExtractError::NoSheets)??;

    let mut candidates = Vec::new();
    for cell in range.rows().flatten() {
        match cell {
            Data::String(value) => {
                let value = value.trim();
                if value.contains('@') {
                    candidates.push(value.to_owned());
                }
            }
            Data::Empty => {}
            other => return Err(ExtractError::NonStringCell(other.to_string())),
        }
    }

    Ok(candidates)
}
