use reqwest::{blocking::Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    catalog::RawTable,
    config::SheetsConfig,
    error::{Error, Result},
    sheets::{table_to_values, values_to_table, Credentials, SheetRef},
};

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Blocking client for the spreadsheet values API.
pub struct SheetsClient {
    client: reqwest::blocking::Client,
    base: Url,
    credentials: Credentials,
}

impl SheetsClient {
    pub fn new(base: &str, credentials: Credentials) -> Result<Self> {
        Self::with_http(base, credentials, reqwest::blocking::Client::new())
    }

    fn with_http(
        base: &str,
        credentials: Credentials,
        client: reqwest::blocking::Client,
    ) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::sheets(format!("invalid api base {base}: {e}")))?;
        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    /// Client for the configured API base, token read from the configured env var.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        Self::new(&config.api_base, Credentials::from_env(&config.token_env)?)
    }

    /// Read a worksheet; the first row is the header.
    ///
    /// Numbers come back as stored, not as displayed, so a popularity cell
    /// formatted as `1,000` reads as `1000`. Dates keep their display text.
    pub fn read_table(&self, sheet: &SheetRef, worksheet: &str) -> Result<RawTable> {
        if !self.worksheet_titles(sheet)?.iter().any(|t| t == worksheet) {
            return Err(Error::WorksheetNotFound(worksheet.to_string()));
        }
        let mut url = self.url(&[sheet.key(), "values", &quote_range(worksheet)])?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
            .append_pair("dateTimeRenderOption", "FORMATTED_STRING");
        let range: ValueRange = self.send(self.client.get(url))?.json().map_err(|e| {
            Error::sheets(format!("failed to parse values of {worksheet}: {e}"))
        })?;
        let table = values_to_table(&range.values);
        debug!(%sheet, worksheet, rows = table.rows.len(), "worksheet read");
        Ok(table)
    }

    /// Replace the contents of a worksheet with `table`, creating the tab if needed.
    /// Numeric columns are written as numbers.
    pub fn write_table(&self, sheet: &SheetRef, worksheet: &str, table: &RawTable) -> Result<()> {
        if !self.worksheet_titles(sheet)?.iter().any(|t| t == worksheet) {
            let url = self.url(&[&format!("{}:batchUpdate", sheet.key())])?;
            let body = json!({
                "requests": [{ "addSheet": { "properties": { "title": worksheet } } }]
            });
            self.send(self.client.post(url).json(&body))?;
            debug!(%sheet, worksheet, "worksheet created");
        }

        let range = quote_range(worksheet);
        let clear = self.url(&[sheet.key(), "values", &format!("{range}:clear")])?;
        self.send(self.client.post(clear).json(&json!({})))?;

        let mut update = self.url(&[sheet.key(), "values", &range])?;
        update
            .query_pairs_mut()
            .append_pair("valueInputOption", "RAW");
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": table_to_values(table),
        });
        self.send(self.client.put(update).json(&body))?;
        info!(%sheet, worksheet, rows = table.rows.len(), "worksheet written");
        Ok(())
    }

    fn worksheet_titles(&self, sheet: &SheetRef) -> Result<Vec<String>> {
        let mut url = self.url(&[sheet.key()])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let meta: SpreadsheetMeta = self
            .send(self.client.get(url))?
            .json()
            .map_err(|e| Error::sheets(format!("failed to parse spreadsheet {sheet}: {e}")))?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::sheets(format!("api base cannot hold a path: {}", self.base)))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response> {
        let response = request
            .header("Authorization", self.credentials.bearer())
            .send()
            .map_err(|e| Error::sheets(format!("request failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::sheets(format!("api error ({status}): {body}")));
        }
        Ok(response)
    }
}

/// A1 range covering a whole worksheet
fn quote_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}
