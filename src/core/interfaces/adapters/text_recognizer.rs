use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::{LanguageHint, ProcessedBitmap};

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, bitmap: &ProcessedBitmap, languages: &LanguageHint)
        -> Result<String>;
}
