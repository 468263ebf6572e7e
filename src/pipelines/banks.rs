use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::shape::{clean_numeric, first_table_rows};
use crate::domain::model::{Cell, Column, RawPayload, Table};
use crate::domain::ports::Pipeline;
use crate::sinks::{CsvSink, SqliteSink};
use crate::utils::error::{EtlError, Result};

const PAGE_URL: &str = "https://en.wikipedia.org/wiki/List_of_largest_banks";
const TABLE_SELECTOR: &str = "table.wikitable";
const CSV_FILE: &str = "top_5_banks.csv";
const DB_FILE: &str = "banks.db";
const DB_TABLE: &str = "top_banks";
const TOP_N: usize = 5;

const BANK_NAME_COLUMN: &str = "Bank_Name";
const ASSETS_COLUMN: &str = "Total_Assets_USD_Billion";

/// Scrapes the largest-banks table and keeps the top 5 by total assets.
pub struct BanksPipeline {
    client: Client,
    page_url: String,
    output_dir: PathBuf,
}

impl BanksPipeline {
    pub fn new() -> Self {
        Self::with_endpoints(PAGE_URL, ".")
    }

    pub fn with_endpoints(page_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            page_url: page_url.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for BanksPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pipeline for BanksPipeline {
    fn name(&self) -> &str {
        "banks"
    }

    async fn extract(&self) -> Result<RawPayload> {
        tracing::debug!("fetching {}", self.page_url);
        let response = self
            .client
            .get(&self.page_url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        tracing::debug!("fetched {} bytes", body.len());
        Ok(RawPayload::Html(body))
    }

    fn transform(&self, raw: RawPayload) -> Result<Table> {
        let RawPayload::Html(html) = raw else {
            return Err(EtlError::shape("banks pipeline expects an HTML payload"));
        };

        let raw_rows = first_table_rows(&html, TABLE_SELECTOR)?;
        tracing::debug!("first matching table has {} data rows", raw_rows.len());

        let mut table = Table::new(vec![
            Column::text(BANK_NAME_COLUMN),
            Column::number(ASSETS_COLUMN),
        ]);
        for (i, cells) in raw_rows.iter().enumerate() {
            // Positions: rank, bank name, total assets.
            if cells.len() < 3 {
                return Err(EtlError::shape(format!(
                    "table row {} has {} cells, expected at least 3",
                    i,
                    cells.len()
                )));
            }
            table.push_row(vec![
                Cell::Text(cells[1].clone()),
                Cell::Number(clean_numeric(&cells[2])),
            ])?;
        }

        table.sort_desc_by(ASSETS_COLUMN)?;
        table.truncate(TOP_N);
        Ok(table)
    }

    async fn load(&self, table: &Table) -> Result<Vec<String>> {
        let csv_sink = CsvSink::new(self.output_dir.join(CSV_FILE));
        csv_sink.write(table)?;

        let sqlite_sink = SqliteSink::new(self.output_dir.join(DB_FILE), DB_TABLE);
        sqlite_sink.write(table)?;

        Ok(vec![
            csv_sink.path().display().to_string(),
            sqlite_sink.identity(),
        ])
    }
}
