//! Tabular data held by the dataset store.
//!
//! A `Dataset` is an ordered list of named columns, each either numeric or
//! categorical, with missing cells represented as `None`. The charting and
//! regression loaders select columns by kind from here.
use std::collections::HashMap;
use std::fmt;

use crate::error::{DeskError, Result};
use crate::stats;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Categorical(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Present values of a numeric column, missing cells dropped.
    pub fn present_values(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|v| v.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v[row].is_none(),
            ColumnData::Categorical(v) => v[row].is_none(),
        }
    }

    /// Display text of one cell; missing cells print as `NaN`.
    pub fn cell_text(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(v) => v[row].map(format_number).unwrap_or_else(|| "NaN".to_string()),
            ColumnData::Categorical(v) => v[row].clone().unwrap_or_else(|| "NaN".to_string()),
        }
    }

    fn select_rows(&self, rows: &[usize]) -> Column {
        let data = match &self.data {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Categorical(v) => {
                ColumnData::Categorical(rows.iter().map(|&r| v[r].clone()).collect())
            }
        };
        Column {
            name: self.name.clone(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset. Requires at least one column and equally long columns.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = match columns.first() {
            Some(c) => c.len(),
            None => {
                return Err(DeskError::MissingColumnKind(
                    "Dataset must have at least one column".to_string(),
                ))
            }
        };
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(DeskError::Computation(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                n_rows
            )));
        }
        Ok(Self { columns, n_rows })
    }

    /// The fixed six-product sales table.
    pub fn sample() -> Self {
        let text = |values: &[&str]| values.iter().map(|v| Some(v.to_string())).collect();
        let numbers = |values: &[f64]| values.iter().copied().map(Some).collect();
        Self {
            columns: vec![
                Column::categorical(
                    "Product",
                    text(&["Laptop", "Mouse", "Monitor", "Keyboard", "Webcam", "Headset"]),
                ),
                Column::categorical(
                    "Category",
                    text(&[
                        "Electronics",
                        "Accessories",
                        "Electronics",
                        "Accessories",
                        "Accessories",
                        "Accessories",
                    ]),
                ),
                Column::numeric("Units_Sold", numbers(&[50.0, 150.0, 80.0, 120.0, 90.0, 110.0])),
                Column::numeric(
                    "Revenue",
                    numbers(&[60000.0, 3750.0, 24000.0, 9000.0, 4500.0, 8800.0]),
                ),
            ],
            n_rows: 6,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    pub fn categorical_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| !c.is_numeric()).collect()
    }

    pub fn first_categorical(&self) -> Option<&Column> {
        self.columns.iter().find(|c| !c.is_numeric())
    }

    /// Mean of every numeric column, in column order. All-missing columns
    /// report NaN.
    pub fn column_means(&self) -> Vec<(String, f64)> {
        self.numeric_columns()
            .into_iter()
            .map(|c| {
                let mean = c.as_numeric().and_then(stats::mean).unwrap_or(f64::NAN);
                (c.name.clone(), mean)
            })
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.n_rows,
            means: self.column_means(),
        }
    }

    /// Keep only rows without a missing cell in any column.
    pub fn drop_missing_rows(&self) -> Dataset {
        let keep: Vec<usize> = (0..self.n_rows)
            .filter(|&r| self.columns.iter().all(|c| !c.is_missing(r)))
            .collect();
        if keep.len() < self.n_rows {
            log::warn!(
                "Dropped {} of {} rows with missing values",
                self.n_rows - keep.len(),
                self.n_rows
            );
        }
        Dataset {
            columns: self.columns.iter().map(|c| c.select_rows(&keep)).collect(),
            n_rows: keep.len(),
        }
    }

    /// Occurrence counts of a categorical column, most frequent first. Ties
    /// keep first-appearance order; missing cells are not counted.
    pub fn value_counts(&self, column: &Column) -> Vec<(String, usize)> {
        let values = match column.as_categorical() {
            Some(v) => v,
            None => return Vec::new(),
        };
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values.iter().flatten() {
            let entry = counts.entry(value.as_str()).or_insert(0);
            if *entry == 0 {
                order.push(value.clone());
            }
            *entry += 1;
        }
        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|v| {
                let n = counts[v.as_str()];
                (v, n)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Text preview: shape, column names and the first `n` rows.
    pub fn preview(&self, n: usize) -> String {
        let shown = n.min(self.n_rows);
        let index_width = shown.saturating_sub(1).to_string().len();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                (0..shown)
                    .map(|r| c.cell_text(r).chars().count())
                    .chain(std::iter::once(c.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("Data Shape: ({}, {})\n", self.n_rows, self.columns.len()));
        out.push_str(&format!("Columns: {:?}\n", self.column_names()));
        out.push_str(&"=".repeat(80));
        out.push_str("\n\n");
        out.push_str(&format!("First {} rows:\n", n));

        out.push_str(&" ".repeat(index_width));
        for (c, w) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", c.name, w = *w));
        }
        out.push('\n');
        for r in 0..shown {
            out.push_str(&format!("{:<w$}", r, w = index_width));
            for (c, w) in self.columns.iter().zip(&widths) {
                out.push_str(&format!("  {:>w$}", c.cell_text(r), w = *w));
            }
            out.push('\n');
        }
        out
    }
}

/// Confirmation shown after a dataset load: row count and numeric means.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub means: Vec<(String, f64)>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.means.is_empty() {
            return write!(f, "✓ {} rows loaded (no numeric columns)", self.rows);
        }
        write!(f, "✓ {} rows loaded\nAverages:", self.rows)?;
        for (name, mean) in &self.means {
            write!(f, "\n{}: {:.2}", name, mean)?;
        }
        Ok(())
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.6}", v);
        s.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_summary_reports_two_decimal_means() {
        let summary = Dataset::sample().summary();
        let text = summary.to_string();
        assert!(text.contains("Units_Sold: 100.00"), "{}", text);
        assert!(text.contains("Revenue: 18341.67"), "{}", text);
    }

    #[test]
    fn preview_lists_shape_and_rows() {
        let preview = Dataset::sample().preview(20);
        assert!(preview.starts_with("Data Shape: (6, 4)"));
        assert!(preview.contains("Headset"));
        assert!(preview.contains("60000"));
    }

    #[test]
    fn value_counts_rank_by_frequency_then_first_appearance() {
        let column = Column::categorical(
            "c",
            ["b", "a", "b", "c", "a", "d"]
                .iter()
                .map(|v| Some(v.to_string()))
                .chain(std::iter::once(None))
                .collect(),
        );
        let numbers = Column::numeric("n", vec![Some(0.0); 7]);
        let dataset = Dataset::new(vec![column.clone(), numbers]).unwrap();
        let counts = dataset.value_counts(&column);
        let expected: Vec<(String, usize)> = vec![
            ("b".to_string(), 2),
            ("a".to_string(), 2),
            ("c".to_string(), 1),
            ("d".to_string(), 1),
        ];
        assert_eq!(counts, expected);
    }

    #[test]
    fn format_number_keeps_precision() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.25), "0.25");
    }
}
