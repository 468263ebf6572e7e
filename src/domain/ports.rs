use crate::domain::model::{RawPayload, Table};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One linear extract -> transform -> load run.
///
/// `extract` performs the single outbound request, `transform` is pure and
/// synchronous, `load` writes every sink for the pipeline and reports the
/// destination identities it wrote.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self) -> Result<RawPayload>;

    fn transform(&self, raw: RawPayload) -> Result<Table>;

    async fn load(&self, table: &Table) -> Result<Vec<String>>;
}
