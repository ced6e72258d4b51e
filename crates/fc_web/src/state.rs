use std::path::PathBuf;
use std::sync::Arc;

use fc_news::FallacyPipeline;

#[derive(Debug, Clone, Default)]
pub struct WebConfig {
    /// Send upstream error text to clients instead of a generic message.
    pub expose_errors: bool,
    /// Serve the front page from this directory instead of the bundled assets.
    pub frontend_dir: Option<PathBuf>,
}

pub struct AppState {
    pub pipeline: Arc<FallacyPipeline>,
    pub config: WebConfig,
}
