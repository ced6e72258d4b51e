use std::fmt;
use std::sync::Arc;

use fc_core::{FallacyCatalog, Result, TextGenerator};
use tracing::debug;

use crate::prompts;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// How many of the most impactful fallacies to report.
    pub max_fallacies: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { max_fallacies: 2 }
    }
}

/// Critiques a summary against the fallacy catalog.
pub struct FallacyAnalyzer {
    model: Arc<dyn TextGenerator>,
    config: AnalysisConfig,
}

impl fmt::Debug for FallacyAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallacyAnalyzer")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl FallacyAnalyzer {
    pub fn new(model: Arc<dyn TextGenerator>, config: AnalysisConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The reply is returned unchanged. It may be blank when the model
    /// found nothing to report.
    pub async fn analyze(&self, summary: &str, catalog: &FallacyCatalog) -> Result<String> {
        let prompt = prompts::analysis_prompt(summary, &catalog.render(), self.config.max_fallacies);
        debug!(model = self.model.name(), prompt_chars = prompt.len(), "Requesting fallacy analysis");
        self.model.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{catalog, RecordingModel};

    #[tokio::test]
    async fn test_analyze_sends_summary_and_catalog() {
        let model = Arc::new(RecordingModel::replying("Straw Man: the opposing view is caricatured."));
        let analyzer = FallacyAnalyzer::new(model.clone(), AnalysisConfig::default());

        let analysis = analyzer.analyze("The minister said critics want chaos.", &catalog()).await.unwrap();
        assert_eq!(analysis, "Straw Man: the opposing view is caricatured.");

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Article Summary: The minister said critics want chaos."));
        assert!(prompts[0].contains("- Slippery Slope: Unfounded chain of consequences."));
        assert!(prompts[0].contains("The 2 most impactful fallacies"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_returned_verbatim() {
        let model = Arc::new(RecordingModel::replying(" \n "));
        let analyzer = FallacyAnalyzer::new(model, AnalysisConfig::default());
        assert_eq!(analyzer.analyze("Neutral summary.", &catalog()).await.unwrap(), " \n ");
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let analyzer = FallacyAnalyzer::new(Arc::new(RecordingModel::failing()), AnalysisConfig::default());
        assert!(analyzer.analyze("s", &catalog()).await.is_err());
    }
}
