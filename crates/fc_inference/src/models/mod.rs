use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use fc_core::{Error, Result, TextGenerator};
use tracing::info;

pub mod dummy;
pub mod openai;

pub use dummy::EchoModel;
pub use openai::OpenAiModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    OpenAi,
    Echo,
}

impl ModelKind {
    pub fn needs_api_key(self) -> bool {
        matches!(self, ModelKind::OpenAi)
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ModelKind::OpenAi),
            "echo" | "dummy" => Ok(ModelKind::Echo),
            other => Err(format!(
                "Unknown model '{}'. Available models: openai (default), echo",
                other
            )),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::OpenAi => f.write_str("openai"),
            ModelKind::Echo => f.write_str("echo"),
        }
    }
}

#[derive(Clone, Default)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn TextGenerator>> {
    let model: Arc<dyn TextGenerator> = match config.kind {
        ModelKind::OpenAi => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;
            let mut model = OpenAiModel::new(api_key)?;
            if let Some(url) = &config.base_url {
                model = model.with_base_url(url);
            }
            if let Some(name) = &config.model_name {
                model = model.with_model(name.clone());
            }
            if let Some(temperature) = config.temperature {
                model = model.with_temperature(temperature);
            }
            if let Some(max_tokens) = config.max_tokens {
                model = model.with_max_tokens(max_tokens);
            }
            info!("🧠 Using OpenAI model {}", model.model());
            Arc::new(model)
        }
        ModelKind::Echo => {
            info!("🧠 Using echo model (prompts are returned unchanged)");
            Arc::new(EchoModel::new())
        }
    };
    Ok(model)
}
