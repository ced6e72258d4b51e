use std::fmt;
use std::sync::Arc;

use fc_core::{FallacyCatalog, Result, TextGenerator};
use tracing::debug;

use crate::prompts;

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Sentence count requested from the model. Not enforced by the model.
    pub sentences: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { sentences: 5 }
    }
}

pub struct Summarizer {
    model: Arc<dyn TextGenerator>,
    config: SummaryConfig,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Summarizer {
    pub fn new(model: Arc<dyn TextGenerator>, config: SummaryConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Returns the model reply as is, surrounding whitespace included.
    pub async fn summarize(&self, article_text: &str, catalog: &FallacyCatalog) -> Result<String> {
        let prompt = prompts::summary_prompt(article_text, &catalog.render(), self.config.sentences);
        debug!(model = self.model.name(), prompt_chars = prompt.len(), "Requesting summary");
        self.model.generate(&prompt).await
    }
}
