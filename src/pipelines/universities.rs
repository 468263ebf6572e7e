use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::shape::{join_list, text_value};
use crate::domain::model::{Cell, Column, RawPayload, Table};
use crate::domain::ports::Pipeline;
use crate::sinks::SqliteSink;
use crate::utils::error::{EtlError, Result};

const API_URL: &str = "http://universities.hipolabs.com/search?country=turkey";
const DB_FILE: &str = "store.db";
const DB_TABLE: &str = "cal_uni";

/// Fetches the universities API and persists one row per university.
pub struct UniversitiesPipeline {
    client: Client,
    api_url: String,
    output_dir: PathBuf,
}

impl UniversitiesPipeline {
    pub fn new() -> Self {
        Self::with_endpoints(API_URL, ".")
    }

    pub fn with_endpoints(api_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for UniversitiesPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pipeline for UniversitiesPipeline {
    fn name(&self) -> &str {
        "universities"
    }

    async fn extract(&self) -> Result<RawPayload> {
        tracing::debug!("fetching {}", self.api_url);
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await?
            .error_for_status()?;
        let payload: Value = response.json().await?;
        Ok(RawPayload::Json(payload))
    }

    fn transform(&self, raw: RawPayload) -> Result<Table> {
        let RawPayload::Json(payload) = raw else {
            return Err(EtlError::shape("universities pipeline expects a JSON payload"));
        };
        let Value::Array(entries) = payload else {
            return Err(EtlError::shape("expected a JSON array of universities"));
        };
        tracing::info!("received {} universities from API", entries.len());

        let mut table = Table::new(vec![
            Column::text("domains"),
            Column::text("country"),
            Column::text("web_pages"),
            Column::text("name"),
        ]);
        for (i, entry) in entries.iter().enumerate() {
            let Value::Object(fields) = entry else {
                return Err(EtlError::shape(format!(
                    "university entry {} is not a JSON object",
                    i
                )));
            };
            table.push_row(vec![
                Cell::Text(join_list(fields.get("domains"))),
                Cell::Text(text_value(fields.get("country"))),
                Cell::Text(join_list(fields.get("web_pages"))),
                Cell::Text(text_value(fields.get("name"))),
            ])?;
        }
        Ok(table)
    }

    async fn load(&self, table: &Table) -> Result<Vec<String>> {
        let sink = SqliteSink::new(self.output_dir.join(DB_FILE), DB_TABLE);
        sink.write(table)?;
        Ok(vec![sink.identity()])
    }
}
