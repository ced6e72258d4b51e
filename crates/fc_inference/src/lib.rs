pub mod models;
pub mod prompts;
pub mod stages;
pub mod validation;

pub use models::{create_model, ModelConfig, ModelKind};
pub use stages::{AnalysisConfig, FallacyAnalyzer, SummaryConfig, Summarizer};
pub use validation::{FormatCheck, FormatPolicy};

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{FallacyAnalyzer, Summarizer};
    pub use fc_core::{Error, FallacyCatalog, Result, TextGenerator};
}
