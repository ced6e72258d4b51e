use async_trait::async_trait;
use fc_core::{Result, TextGenerator};

/// Returns every prompt unchanged. Used for offline runs and tests.
#[derive(Debug, Default, Clone)]
pub struct EchoModel;

impl EchoModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for EchoModel {
    fn name(&self) -> &str {
        "Echo"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(prompt.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_model() {
        let model = EchoModel::new();
        assert_eq!(model.name(), "Echo");
        let out = model.generate("Summarize this.\n\nArticle: x").await.unwrap();
        assert_eq!(out, "Summarize this.\n\nArticle: x");
    }
}
