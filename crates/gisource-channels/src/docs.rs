//! Google Docs channel — the durable article archive behind `Document`.

use async_trait::async_trait;
use gisource_core::config::DocsConfig;
use gisource_core::error::{GisourceError, Result};
use gisource_core::traits::Document;
use serde_json::{json, Value};

/// Google Docs client bound to one document.
pub struct DocsClient {
    config: DocsConfig,
    client: reqwest::Client,
}

impl DocsClient {
    pub fn new(config: DocsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn get_document(&self) -> Result<Value> {
        let url = format!(
            "https://docs.googleapis.com/v1/documents/{}",
            self.config.document_id
        );
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| GisourceError::Doc(format!("documents.get: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GisourceError::Doc(format!(
                "documents.get failed with {status}: {body}"
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GisourceError::Doc(format!("Invalid documents.get response: {e}")))
    }

    async fn batch_update(&self, requests: Vec<Value>) -> Result<()> {
        let url = format!(
            "https://docs.googleapis.com/v1/documents/{}:batchUpdate",
            self.config.document_id
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| GisourceError::Doc(format!("batchUpdate: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GisourceError::Doc(format!(
                "batchUpdate failed with {status}: {body}"
            )));
        }
        Ok(())
    }

    /// Flatten the document body into plain text.
    fn extract_text(document: &Value) -> String {
        let mut text = String::new();
        let Some(content) = document["body"]["content"].as_array() else {
            return text;
        };
        for element in content {
            let Some(elements) = element["paragraph"]["elements"].as_array() else {
                continue;
            };
            for elem in elements {
                if let Some(run) = elem["textRun"]["content"].as_str() {
                    text.push_str(run);
                }
            }
        }
        text
    }

    /// End index for appends: one before the final newline the API keeps.
    fn end_index(document: &Value) -> i64 {
        document["body"]["content"]
            .as_array()
            .and_then(|content| content.last())
            .and_then(|element| element["endIndex"].as_i64())
            .unwrap_or(1)
            - 1
    }

    /// Length in UTF-16 code units, the unit Docs indexes count in.
    fn utf16_len(text: &str) -> i64 {
        text.encode_utf16().count() as i64
    }
}

#[async_trait]
impl Document for DocsClient {
    async fn contains(&self, needle: &str) -> Result<bool> {
        let document = self.get_document().await?;
        Ok(Self::extract_text(&document).contains(needle))
    }

    async fn append(&self, text: &str, subtitle: Option<&str>) -> Result<()> {
        let document = self.get_document().await?;
        let mut end_index = Self::end_index(&document);
        let mut requests = Vec::new();

        if let Some(subtitle) = subtitle {
            let formatted = format!("\n\n{subtitle}\n\n");
            requests.push(json!({
                "insertText": {
                    "location": { "index": end_index },
                    "text": formatted,
                }
            }));
            requests.push(json!({
                "updateTextStyle": {
                    "range": {
                        "startIndex": end_index + 2,
                        "endIndex": end_index + 2 + Self::utf16_len(subtitle),
                    },
                    "textStyle": {
                        "bold": true,
                        "fontSize": { "magnitude": 16, "unit": "PT" },
                    },
                    "fields": "bold,fontSize",
                }
            }));
            requests.push(json!({
                "updateParagraphStyle": {
                    "range": {
                        "startIndex": end_index + 2,
                        "endIndex": end_index + 2 + Self::utf16_len(subtitle),
                    },
                    "paragraphStyle": { "alignment": "CENTER" },
                    "fields": "alignment",
                }
            }));
            end_index += Self::utf16_len(&formatted);
        }

        requests.push(json!({
            "insertText": {
                "location": { "index": end_index },
                "text": format!("{text}\n\n"),
            }
        }));

        self.batch_update(requests).await?;
        tracing::info!("📄 Document updated");
        Ok(())
    }
}
