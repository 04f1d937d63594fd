use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Record, RowStore, cell_matches, to_records};
use crate::error::{Result, StorageError};

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// Connection settings for one sheet of a spreadsheet.
#[derive(Clone)]
pub struct SheetsConfig {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// OAuth access token, issued outside this service.
    pub access_token: String,
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// [`RowStore`] over the Sheets v4 `values` REST API.
pub struct SheetsStore {
    client: Client,
    base_url: Url,
    config: SheetsConfig,
}

impl SheetsStore {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| StorageError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// `'Sheet name'` quoted for A1 notation.
    fn sheet(&self) -> String {
        format!("'{}'", self.config.sheet_name.replace('\'', "''"))
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.config.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(range)?;
        tracing::debug!(%range, "Reading sheet values");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        let body: ValueRange = check(response).await?.json().await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }
}

/// Turns a non-2xx reply into [`StorageError::Remote`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), %message, "Row store rejected request");
    Err(StorageError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 0-based column position to A1 letters: `0 -> A`, `25 -> Z`, `26 -> AA`.
pub(crate) fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Data row 0 sits under the header, on sheet row 2.
fn sheet_row(row: usize) -> usize {
    row + 2
}

#[async_trait::async_trait]
impl RowStore for SheetsStore {
    async fn header(&self) -> Result<Vec<String>> {
        let rows = self.get_values(&format!("{}!1:1", self.sheet())).await?;
        rows.into_iter()
            .next()
            .filter(|header| header.iter().any(|cell| !cell.trim().is_empty()))
            .ok_or(StorageError::MissingHeader)
    }

    async fn append(&self, fields: &[String]) -> Result<()> {
        let mut url = self.values_url(&format!("{}!A1:append", self.sheet()))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "majorDimension": "ROWS", "values": [fields] }))
            .send()
            .await?;
        check(response).await?;

        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Record>> {
        let mut rows = self.get_values(&self.sheet()).await?.into_iter();
        let header = rows.next().ok_or(StorageError::MissingHeader)?;

        Ok(to_records(&header, rows.collect()))
    }

    async fn find_row_index(&self, column: usize, value: &str) -> Result<Option<usize>> {
        let letters = column_letters(column);
        let range = format!("{}!{letters}{}:{letters}", self.sheet(), sheet_row(0));
        let cells = self.get_values(&range).await?;

        Ok(cells.iter().position(|row| {
            row.first()
                .is_some_and(|cell| cell_matches(cell, value))
        }))
    }

    async fn set_cell(&self, row: usize, column: usize, value: &str) -> Result<()> {
        let range = format!(
            "{}!{}{}",
            self.sheet(),
            column_letters(column),
            sheet_row(row)
        );
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [[value]],
            }))
            .send()
            .await?;
        check(response).await?;

        Ok(())
    }
}
