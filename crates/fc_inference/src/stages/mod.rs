pub mod analyzer;
pub mod summarizer;

pub use analyzer::{AnalysisConfig, FallacyAnalyzer};
pub use summarizer::{SummaryConfig, Summarizer};
