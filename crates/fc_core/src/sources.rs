use async_trait::async_trait;
use crate::types::{SearchHit, SearchQuery};
use crate::Result;

#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Returns news hits in provider order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its plain text content
    async fn fetch(&self, url: &str) -> Result<String>;
}
