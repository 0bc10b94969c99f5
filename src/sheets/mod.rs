//! Remote catalog sync against a spreadsheet service.
//!
//! The catalog can live in a spreadsheet tab instead of a CSV file. This
//! module reads such a tab into a [`RawTable`] and writes result tables back,
//! so the rest of the crate never sees the remote format.

pub mod client;

use std::fmt;

use serde_json::Value;

use crate::{
    catalog::RawTable,
    error::{Error, Result},
};

pub use client::SheetsClient;

/// Identifies a spreadsheet by its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    key: String,
}

impl SheetRef {
    /// Accepts a full spreadsheet URL (`…/spreadsheets/d/<key>/…`) or a bare key.
    pub fn parse(url_or_key: &str) -> Result<Self> {
        let input = url_or_key.trim();
        if input.is_empty() {
            return Err(Error::sheets("empty spreadsheet reference"));
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            let key = input
                .split_once("/spreadsheets/d/")
                .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or(""))
                .filter(|key| !key.is_empty())
                .ok_or_else(|| Error::sheets(format!("no spreadsheet key in url: {input}")))?;
            return Ok(Self { key: key.to_string() });
        }
        if input.contains('/') {
            return Err(Error::sheets(format!("not a spreadsheet key: {input}")));
        }
        Ok(Self { key: input.to_string() })
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Bearer access token for the spreadsheet API.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Credentials("access token is empty".to_string()));
        }
        Ok(Self { token })
    }

    /// Read the token from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self> {
        let token = std::env::var(var)
            .map_err(|_| Error::Credentials(format!("environment variable {var} is not set")))?;
        Self::new(token)
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("token", &"***").finish()
    }
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First row is the header, the rest are data rows; blank rows are dropped.
pub fn values_to_table(values: &[Vec<Value>]) -> RawTable {
    let Some((header, rows)) = values.split_first() else {
        return RawTable::default();
    };
    let mut table = RawTable::new(
        header.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect(),
    );
    table.drop_blank_rows();
    table
}

fn number_cell(cell: &str) -> Option<Value> {
    let n = cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    serde_json::Number::from_f64(n).map(Value::Number)
}

/// Header row followed by data rows.
///
/// A column whose non-empty cells all parse as finite numbers is sent as
/// numbers. Everything else is text.
pub fn table_to_values(table: &RawTable) -> Vec<Vec<Value>> {
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .chain([table.header.len()])
        .max()
        .unwrap_or(0);
    let numeric: Vec<bool> = (0..width)
        .map(|col| {
            let mut cells = table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .peekable();
            cells.peek().is_some() && cells.all(|cell| number_cell(cell).is_some())
        })
        .collect();

    let header: Vec<Value> = table.header.iter().cloned().map(Value::String).collect();
    let rows = table.rows.iter().map(|row| {
        row.iter()
            .enumerate()
            .map(|(col, cell)| {
                numeric[col]
                    .then(|| number_cell(cell))
                    .flatten()
                    .unwrap_or_else(|| Value::String(cell.clone()))
            })
            .collect::<Vec<Value>>()
    });
    std::iter::once(header).chain(rows).collect()
}
