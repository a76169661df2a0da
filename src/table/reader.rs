//! Loading the movie table back from CSV

use crate::error::{Error, Result};
use csv::StringRecord;
use std::collections::HashSet;

/// Columns the visualizer reads
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Title",
    "Budget",
    "Revenue",
    "Genre",
    "Popularity",
    "Production Companies",
];

// Cells treated as missing, matching common CSV NA conventions
const MISSING_MARKERS: [&str; 9] = ["", "N/A", "NA", "NaN", "nan", "null", "NULL", "None", "n/a"];

fn present(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(cell)
    }
}

fn number(cell: &str) -> Option<f64> {
    present(cell)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Typed view of one row over the required columns
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub title: Option<String>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub genre: Option<String>,
    pub popularity: Option<f64>,
    pub production_companies: Option<String>,
}

/// Row-oriented table loaded from CSV
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    columns: Vec<String>,
    rows: Vec<StringRecord>,
}

impl MovieTable {
    /// Parse CSV bytes; the first record is the header
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let columns = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Fail with the first required column that is absent
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|c| self.column_index(c).is_none()) {
            Some(column) => Err(Error::missing_column(*column)),
            None => Ok(()),
        }
    }

    /// Cell value at (row, column name)
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Keep the first row for each distinct value of `column`
    ///
    /// Rows where the column is missing are grouped together as one value.
    pub fn dedup_by(&mut self, column: &str) -> Result<usize> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| Error::missing_column(column))?;

        let before = self.rows.len();
        let mut seen = HashSet::new();
        self.rows.retain(|row| {
            let key = row.get(idx).and_then(present).map(str::to_string);
            seen.insert(key)
        });
        Ok(before - self.rows.len())
    }

    /// Typed records over the required columns
    pub fn summary_records(&self) -> Result<Vec<SummaryRecord>> {
        self.require_columns(&REQUIRED_COLUMNS)?;
        let idx = |name: &str| self.column_index(name).unwrap_or_default();
        let (title, budget, revenue, genre, popularity, companies) = (
            idx("Title"),
            idx("Budget"),
            idx("Revenue"),
            idx("Genre"),
            idx("Popularity"),
            idx("Production Companies"),
        );

        let text = |row: &StringRecord, i: usize| {
            row.get(i).and_then(present).map(str::to_string)
        };
        let num = |row: &StringRecord, i: usize| row.get(i).and_then(number);

        Ok(self
            .rows
            .iter()
            .map(|row| SummaryRecord {
                title: text(row, title),
                budget: num(row, budget),
                revenue: num(row, revenue),
                genre: text(row, genre),
                popularity: num(row, popularity),
                production_companies: text(row, companies),
            })
            .collect())
    }
}
