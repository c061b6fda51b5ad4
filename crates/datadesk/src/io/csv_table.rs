//! CSV/TSV reader producing a typed `Dataset`.
use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;

use crate::data_handling::{Column, Dataset};
use crate::error::{DeskError, Result};

/// Cell texts treated as missing values.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
];

/// Read a CSV file into a `Dataset`. Files ending in `.tsv` are read
/// tab-separated.
///
/// A column is numeric when every non-missing cell parses as a number,
/// categorical otherwise.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let is_tsv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    let delimiter = if is_tsv { b'\t' } else { b',' };

    let file = std::fs::File::open(path)
        .map_err(|e| DeskError::io(format!("Failed to open file: {}", path.display()), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
        return Err(DeskError::MissingColumnKind(
            "No columns to parse from file".to_string(),
        ));
    }
    let names = column_names(&headers);

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != names.len() {
            return Err(DeskError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                names.len(),
                row_idx + 2,
                record.len()
            )));
        }
        for (col, value) in record.iter().enumerate() {
            cells[col].push(parse_cell(value));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();

    let dataset = Dataset::new(columns)?;
    log::info!(
        "Read {} rows x {} columns from {}",
        dataset.n_rows(),
        dataset.n_columns(),
        path.display()
    );
    Ok(dataset)
}

/// Unique column names: blanks become `Unnamed: i`, repeats get `.1`, `.2`...
fn column_names(headers: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = match header.trim() {
                "" => format!("Unnamed: {}", idx),
                name => name.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn parse_cell(value: &str) -> Option<String> {
    if MISSING_TOKENS.contains(&value.trim()) {
        None
    } else {
        Some(value.to_string())
    }
}

fn infer_column(name: String, values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(text) => text.trim().parse::<f64>().ok().map(Some),
        })
        .collect();

    match parsed {
        Some(numbers) if !values.is_empty() => Column::numeric(name, numbers),
        _ => Column::categorical(name, values),
    }
}
