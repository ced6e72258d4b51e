pub mod fetch;
pub mod pipeline;
pub mod retriever;
pub mod search;
pub mod text;

pub use fetch::HttpPageFetcher;
pub use pipeline::{FallacyPipeline, PipelineConfig};
pub use retriever::{ArticleRetriever, RetrievalConfig};
pub use search::SerperNewsSearch;

pub mod prelude {
    pub use super::{FallacyPipeline, PipelineConfig, RetrievalConfig};
    pub use fc_core::{AnalysisResult, Error, FallacyCatalog, Result};
}
