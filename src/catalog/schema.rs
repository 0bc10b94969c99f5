use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, Item};
use crate::error::{Error, Result};

/// Untyped table: a header row plus string cells.
/// This is the shape spreadsheets and CSV files hand us.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Read a table from CSV; the first record is the header.
    /// Rows may be shorter than the header (missing cells read as empty).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let header = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { header, rows })
    }

    /// Write the table as CSV with a header record.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Column position by (trimmed, exact) header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Drop rows whose every cell is blank.
    pub fn drop_blank_rows(&mut self) {
        self.rows
            .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    }
}

/// Column mapping applied once at load time.
///
/// Only the title column is required. A missing text column reads as empty
/// for every row, a missing popularity column reads as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSchema {
    pub title: String,
    pub short_description: String,
    pub tags: String,
    pub popularity: String,
}

impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            short_description: "short_description".to_string(),
            tags: "tags".to_string(),
            popularity: "popularity".to_string(),
        }
    }
}

impl CatalogSchema {
    /// Turn a raw table into a typed catalog.
    pub fn apply(&self, table: &RawTable) -> Result<Catalog> {
        let title_col = table
            .column(&self.title)
            .ok_or_else(|| Error::MissingColumn(self.title.clone()))?;
        let desc_col = table.column(&self.short_description);
        let tags_col = table.column(&self.tags);
        let pop_col = table.column(&self.popularity);
        debug!(
            rows = table.rows.len(),
            has_popularity = pop_col.is_some(),
            "applying catalog schema"
        );

        let mut items = Vec::with_capacity(table.rows.len());
        for (row_idx, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cell = |col: Option<usize>| -> Option<&str> {
                col.and_then(|c| row.get(c)).map(String::as_str)
            };
            let title = cell(Some(title_col)).unwrap_or("").trim();
            if title.is_empty() {
                return Err(Error::invalid_value(row_idx, &self.title, "title is empty"));
            }
            let popularity = match cell(pop_col).map(str::trim) {
                None | Some("") => 0.0,
                Some(raw) => parse_popularity(raw)
                    .ok_or_else(|| {
                        Error::invalid_value(
                            row_idx,
                            &self.popularity,
                            format!("expected a finite non-negative number, got {raw:?}"),
                        )
                    })?,
            };
            items.push((
                row_idx,
                Item {
                    title: title.to_string(),
                    short_description: non_blank(cell(desc_col)),
                    tags: non_blank(cell(tags_col)),
                    popularity,
                },
            ));
        }
        Catalog::from_rows(items)
    }
}

fn non_blank(cell: Option<&str>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

fn parse_popularity(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
