//! Turn an uploaded file into loosely-typed rows keyed by the raw header text.
//!
//! The reader is chosen by extension. Spreadsheet containers use the first
//! worksheet and take its first row as the header row. Columns with a blank
//! header are dropped. Rows are returned even when blank; the normalizer
//! decides what to skip.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use calamine::{Data, Reader, open_workbook_auto};
use serde_json::Value;

use super::{ImportError, Row, coerce::number_value};

/// Read `path` into rows.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_csv(open(path)?)?,
        "json" => read_json(open(path)?)?,
        _ => return Err(ImportError::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::debug!(path = %path.display(), rows = rows.len(), "rows read");
    Ok(rows)
}

fn open(path: &Path) -> Result<BufReader<File>, ImportError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// First worksheet of a spreadsheet container.
pub fn read_workbook(path: &Path) -> Result<Vec<Row>, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::NoWorksheet(path.to_path_buf()))??;

    let mut lines = range.rows();
    let Some(header_row) = lines.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string().trim().to_string()).collect();

    Ok(lines
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, c)| (h.clone(), cell_value(c)))
                .collect()
        })
        .collect())
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => number_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}

/// CSV with a header row. Short records are padded with blanks.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Row>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, h)| {
                let cell = record.get(i).unwrap_or("");
                (h.clone(), Value::String(cell.to_string()))
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// JSON array of objects (an export of the catalog, or hand-written rows).
pub fn read_json<R: Read>(input: R) -> Result<Vec<Row>, ImportError> {
    Ok(serde_json::from_reader(input)?)
}
