use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives one pipeline through its three stages, once, in order.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("starting {} ETL process", self.pipeline.name());

        tracing::info!("extracting data...");
        let raw = self.pipeline.extract().await?;

        tracing::info!("transforming data...");
        let table = self.pipeline.transform(raw)?;
        tracing::info!(
            "transformed {} rows x {} columns",
            table.len(),
            table.columns().len()
        );

        tracing::info!("loading data...");
        let destinations = self.pipeline.load(&table).await?;
        for destination in &destinations {
            tracing::info!("wrote {}", destination);
        }

        tracing::info!("{} ETL process complete", self.pipeline.name());
        Ok(destinations)
    }
}
