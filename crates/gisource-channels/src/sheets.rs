//! Google Sheets channel — the intake spreadsheet behind `CandidateSource`.
//!
//! Plain REST against sheets.googleapis.com/v4 with a provisioned OAuth
//! access token; no client library, no browser flow.

use async_trait::async_trait;
use gisource_core::config::SheetsConfig;
use gisource_core::error::{GisourceError, Result};
use gisource_core::traits::CandidateSource;
use serde::Deserialize;
use serde_json::json;

/// Google Sheets client bound to one spreadsheet.
pub struct SheetsClient {
    config: SheetsConfig,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{range}{suffix}",
            self.config.spreadsheet_id
        )
    }

    async fn check(&self, response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(GisourceError::Sheet(format!(
            "{action} failed with {status}: {body}"
        )))
    }

    fn cell_to_string(cell: serde_json::Value) -> String {
        match cell {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl CandidateSource for SheetsClient {
    async fn fetch(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let response = self
            .client
            .get(self.values_url(range, ""))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| GisourceError::Sheet(format!("values.get: {e}")))?;
        let body: ValueRange = self
            .check(response, "values.get")
            .await?
            .json()
            .await
            .map_err(|e| GisourceError::Sheet(format!("Invalid values.get response: {e}")))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(Self::cell_to_string).collect())
            .collect())
    }

    async fn delete_rows(&self, sheet_id: i64, mut rows: Vec<usize>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        // Delete back-to-front so earlier indexes stay valid.
        rows.sort_unstable_by(|a, b| b.cmp(a));

        let requests: Vec<serde_json::Value> = rows
            .iter()
            .map(|&start| {
                json!({
                    "deleteDimension": {
                        "range": {
                            "sheetId": sheet_id,
                            "dimension": "ROWS",
                            "startIndex": start,
                            "endIndex": start + 1,
                        }
                    }
                })
            })
            .collect();

        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}:batchUpdate",
            self.config.spreadsheet_id
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| GisourceError::Sheet(format!("batchUpdate: {e}")))?;
        self.check(response, "batchUpdate").await?;
        tracing::info!("🧹 {} sheet rows deleted", rows.len());
        Ok(())
    }

    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let response = self
            .client
            .post(self.values_url(range, ":append"))
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| GisourceError::Sheet(format!("values.append: {e}")))?;
        self.check(response, "values.append").await?;
        Ok(())
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let response = self
            .client
            .put(self.values_url(range, ""))
            .bearer_auth(&self.config.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| GisourceError::Sheet(format!("values.update: {e}")))?;
        self.check(response, "values.update").await?;
        Ok(())
    }
}
