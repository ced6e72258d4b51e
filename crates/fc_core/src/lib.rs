pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use catalog::{FallacyCatalog, FallacyEntry};
pub use error::{Error, ErrorKind, Result};
pub use models::TextGenerator;
pub use sources::{NewsSearch, PageFetcher};
pub use types::{
    AnalysisResult, ArticleText, Recency, RecencyUnit, RetrievedArticle, SearchHit, SearchQuery,
};
