use anyhow::Result;
use async_trait::async_trait;

/// Destination for recognized text, one row per call.
#[async_trait]
pub trait RowSink: Send + Sync {
    async fn append_row(&self, values: &[String]) -> Result<()>;
}
