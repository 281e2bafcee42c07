//! First-sheet XLSX reading.
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::error::Error;

/// Rows of the first worksheet of `path`, header included.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Data>>, Error> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Custom(format!("{:?}: workbook has no worksheet", path)))??;

    Ok(range.rows().map(|row| row.to_vec()).collect())
}

/// Cell at `col`, as text. Empty and missing cells are empty strings.
pub fn text(row: &[Data], col: usize) -> String {
    match row.get(col) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        // integral floats are written without a trailing `.0`
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(cell) => cell.to_string(),
    }
}

/// Cell at `col`, if it holds a number.
pub fn number(row: &[Data], col: usize) -> Option<f64> {
    match row.get(col) {
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::Float(f)) => Some(*f),
        _ => None,
    }
}

/// Cell at `col`, if it holds an integral number.
pub fn integer(row: &[Data], col: usize) -> Option<i64> {
    number(row, col).filter(|f| f.fract() == 0.0).map(|f| f as i64)
}
