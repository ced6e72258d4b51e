use std::sync::Arc;

use fc_core::{Error, NewsSearch, PageFetcher, Recency, Result, RetrievedArticle, SearchQuery};
use tracing::{debug, info};

use crate::text::prepare_article_text;

pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 3000;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub recency: Recency,
    /// Position in the provider's result list to use; 0 is the top hit.
    pub result_index: usize,
    pub max_article_chars: usize,
    pub search_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            recency: Recency::default(),
            result_index: 0,
            max_article_chars: DEFAULT_MAX_ARTICLE_CHARS,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Finds one recent article for a topic and returns its prepared text.
pub struct ArticleRetriever {
    search: Arc<dyn NewsSearch>,
    fetcher: Arc<dyn PageFetcher>,
    config: RetrievalConfig,
}

impl ArticleRetriever {
    pub fn new(
        search: Arc<dyn NewsSearch>,
        fetcher: Arc<dyn PageFetcher>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// `Ok(None)` when the search produced no usable hit.
    pub async fn retrieve(&self, topic: &str) -> Result<Option<RetrievedArticle>> {
        let query = SearchQuery {
            text: topic.to_string(),
            recency: self.config.recency,
            limit: self.config.search_limit.max(self.config.result_index.saturating_add(1)),
        };
        let hits = self.search.search(&query).await?;
        debug!(topic, hits = hits.len(), "Search returned");

        let Some(hit) = hits.into_iter().nth(self.config.result_index) else {
            info!(topic, "📭 No articles found");
            return Ok(None);
        };

        info!(title = %hit.title, url = %hit.url, "📰 Fetching article");
        let raw = self.fetcher.fetch(&hit.url).await?;
        let text = prepare_article_text(&raw, self.config.max_article_chars);
        if text.is_empty() {
            return Err(Error::Fetch(format!("{} contained no readable text", hit.url)));
        }
        debug!(url = %hit.url, raw_chars = raw.chars().count(), chars = text.char_len(), "Prepared article text");

        Ok(Some(RetrievedArticle { hit, text }))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{MockFetcher, MockSearch};
    use super::*;
    use fc_core::{RecencyUnit, SearchHit};

    fn hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new("First", "https://a.example/first"),
            SearchHit::new("Second", "https://b.example/second"),
        ]
    }

    #[tokio::test]
    async fn test_takes_first_hit_and_normalizes() {
        let search = Arc::new(MockSearch::with_hits(hits()));
        let fetcher = Arc::new(MockFetcher::returning("  Body\n\ntext\twith   gaps  "));
        let retriever = ArticleRetriever::new(search.clone(), fetcher.clone(), RetrievalConfig::default());

        let article = retriever.retrieve("tariffs").await.unwrap().unwrap();
        assert_eq!(article.hit.title, "First");
        assert_eq!(article.text.as_str(), "Body text with gaps");
        assert_eq!(fetcher.urls.lock().unwrap().as_slice(), ["https://a.example/first"]);

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries[0].text, "tariffs");
        assert_eq!(queries[0].recency.as_tbs(), "qdr:m1");
    }

    #[tokio::test]
    async fn test_empty_results_are_not_found() {
        let search = Arc::new(MockSearch::with_hits(vec![]));
        let fetcher = Arc::new(MockFetcher::returning("unused"));
        let retriever = ArticleRetriever::new(search, fetcher.clone(), RetrievalConfig::default());

        assert!(retriever.retrieve("inflation").await.unwrap().is_none());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_result_index_and_recency_are_configurable() {
        let search = Arc::new(MockSearch::with_hits(hits()));
        let fetcher = Arc::new(MockFetcher::returning("text"));
        let config = RetrievalConfig {
            recency: Recency::new(RecencyUnit::Week, 1),
            result_index: 1,
            ..Default::default()
        };
        let retriever = ArticleRetriever::new(search.clone(), fetcher, config);

        let article = retriever.retrieve("tariffs").await.unwrap().unwrap();
        assert_eq!(article.hit.title, "Second");
        assert_eq!(search.queries.lock().unwrap()[0].recency.as_tbs(), "qdr:w1");

        let config = RetrievalConfig {
            result_index: 5,
            ..Default::default()
        };
        let retriever = ArticleRetriever::new(
            Arc::new(MockSearch::with_hits(hits())),
            Arc::new(MockFetcher::returning("text")),
            config,
        );
        assert!(retriever.retrieve("tariffs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_largest_result_index_does_not_overflow() {
        let search = Arc::new(MockSearch::with_hits(hits()));
        let config = RetrievalConfig {
            result_index: usize::MAX,
            ..Default::default()
        };
        let retriever = ArticleRetriever::new(
            search.clone(),
            Arc::new(MockFetcher::returning("text")),
            config,
        );

        assert!(retriever.retrieve("tariffs").await.unwrap().is_none());
        assert_eq!(search.queries.lock().unwrap()[0].limit, usize::MAX);
    }

    #[tokio::test]
    async fn test_text_is_capped() {
        let body = "x".repeat(5000);
        let retriever = ArticleRetriever::new(
            Arc::new(MockSearch::with_hits(hits())),
            Arc::new(MockFetcher::returning(&body)),
            RetrievalConfig::default(),
        );
        let article = retriever.retrieve("t").await.unwrap().unwrap();
        assert_eq!(article.text.char_len(), DEFAULT_MAX_ARTICLE_CHARS);
    }

    #[tokio::test]
    async fn test_blank_page_is_an_error() {
        let retriever = ArticleRetriever::new(
            Arc::new(MockSearch::with_hits(hits())),
            Arc::new(MockFetcher::returning(" \n\t ")),
            RetrievalConfig::default(),
        );
        let err = retriever.retrieve("t").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let fetcher = Arc::new(MockFetcher::returning("unused"));
        let retriever = ArticleRetriever::new(
            Arc::new(MockSearch::failing()),
            fetcher.clone(),
            RetrievalConfig::default(),
        );
        assert!(matches!(retriever.retrieve("t").await, Err(Error::Search(_))));
        assert_eq!(fetcher.calls(), 0);
    }
}
