//! Topic in, critique out.
//!
//! `FallacyPipeline` runs retrieval, summary and analysis strictly in
//! sequence. Every collaborator is injected, so the same pipeline runs
//! against Serper/OpenAI in production and against mocks in tests.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use fc_core::{
    AnalysisResult, Error, FallacyCatalog, NewsSearch, PageFetcher, Result, TextGenerator,
};
use fc_inference::validation::{check_analysis, check_summary};
use fc_inference::{
    AnalysisConfig, FallacyAnalyzer, FormatCheck, FormatPolicy, SummaryConfig, Summarizer,
};
use tracing::{info, warn};

use crate::retriever::{ArticleRetriever, RetrievalConfig};

pub const MISSING_TOPIC: &str = "Missing topic text.";

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub retrieval: RetrievalConfig,
    pub summary: SummaryConfig,
    pub analysis: AnalysisConfig,
    pub format_policy: FormatPolicy,
}

pub struct FallacyPipeline {
    retriever: ArticleRetriever,
    summarizer: Summarizer,
    analyzer: FallacyAnalyzer,
    catalog: Arc<FallacyCatalog>,
    format_policy: FormatPolicy,
}

impl fmt::Debug for FallacyPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallacyPipeline")
            .field("retrieval", self.retriever.config())
            .field("summarizer", &self.summarizer)
            .field("analyzer", &self.analyzer)
            .field("fallacies", &self.catalog.len())
            .field("format_policy", &self.format_policy)
            .finish()
    }
}

impl FallacyPipeline {
    pub fn new(
        search: Arc<dyn NewsSearch>,
        fetcher: Arc<dyn PageFetcher>,
        model: Arc<dyn TextGenerator>,
        catalog: Arc<FallacyCatalog>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            retriever: ArticleRetriever::new(search, fetcher, config.retrieval),
            summarizer: Summarizer::new(model.clone(), config.summary),
            analyzer: FallacyAnalyzer::new(model, config.analysis),
            catalog,
            format_policy: config.format_policy,
        }
    }

    pub fn catalog(&self) -> &FallacyCatalog {
        &self.catalog
    }

    pub async fn run(&self, topic: &str) -> Result<AnalysisResult> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::Validation(MISSING_TOPIC.to_string()));
        }

        let started = Instant::now();
        info!(topic, "🦗 Starting fallacy analysis");

        let article = self
            .retriever
            .retrieve(topic)
            .await?
            .ok_or(Error::NoArticlesFound)?;

        let summary = self
            .summarizer
            .summarize(article.text.as_str(), &self.catalog)
            .await?;
        info!(chars = summary.chars().count(), "✨ Summary generated");
        self.apply_policy(check_summary(&summary, self.summarizer.config().sentences))?;

        let analysis = self.analyzer.analyze(&summary, &self.catalog).await?;
        info!(chars = analysis.chars().count(), "✨ Analysis generated");
        self.apply_policy(check_analysis(
            &analysis,
            &self.catalog,
            self.analyzer.config().max_fallacies,
        ))?;

        info!(
            topic,
            url = %article.hit.url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ Fallacy analysis complete"
        );

        Ok(AnalysisResult {
            sources: article.hit.source_line(),
            summary,
            analysis,
        })
    }

    fn apply_policy(&self, check: FormatCheck) -> Result<()> {
        if check.ok {
            return Ok(());
        }
        match self.format_policy {
            FormatPolicy::Off => Ok(()),
            FormatPolicy::Warn => {
                warn!(stage = check.stage, expected = check.expected, found = check.found, "⚠️ Model output ignored the requested format");
                Ok(())
            }
            FormatPolicy::Enforce => Err(Error::Format(check.to_string())),
        }
    }
}
