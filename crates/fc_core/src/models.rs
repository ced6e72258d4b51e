use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Generate a completion for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
