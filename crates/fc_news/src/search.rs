use std::time::Duration;

use async_trait::async_trait;
use fc_core::{Error, NewsSearch, Result, SearchHit, SearchQuery};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SERPER_NEWS_URL: &str = "https://google.serper.dev/news";

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    tbs: String,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperNewsResponse {
    #[serde(default)]
    news: Vec<SerperNewsItem>,
}

#[derive(Debug, Deserialize)]
struct SerperNewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

/// Google News search through the Serper API.
pub struct SerperNewsSearch {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for SerperNewsSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperNewsSearch")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl SerperNewsSearch {
    pub fn new(api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            api_key: api_key.to_string(),
            endpoint: SERPER_NEWS_URL.to_string(),
            client,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[async_trait]
impl NewsSearch for SerperNewsSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        info!(query = %query.text, recency = %query.recency, "🔍 Serper news search");

        let body = SerperRequest {
            q: &query.text,
            tbs: query.recency.as_tbs(),
            num: query.limit,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Search(format!("Serper API error ({}): {}", status, message)));
        }

        let data: SerperNewsResponse = resp.json().await?;
        let hits = into_hits(data);

        info!(query = %query.text, count = hits.len(), "Serper search complete");
        Ok(hits)
    }
}

fn into_hits(data: SerperNewsResponse) -> Vec<SearchHit> {
    data.news
        .into_iter()
        .filter(|item| !item.link.trim().is_empty())
        .map(|item| SearchHit::new(item.title, item.link))
        .collect()
}
