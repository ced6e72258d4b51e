use std::path::PathBuf;

use crate::{Error, Result};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const FALLACIES_PATH: &str = "FALLACIES_PATH";

/// Secrets and paths read from the process environment at startup.
#[derive(Clone)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub serper_api_key: String,
    pub openai_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub fallacies_path: Option<PathBuf>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("serper_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("fallacies_path", &self.fallacies_path)
            .finish()
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the environment. Both API keys
    /// are required unless `require_openai` is false.
    pub fn from_env(require_openai: bool) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(require_openai, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(require_openai: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let serper_api_key = get(SERPER_API_KEY);
        if serper_api_key.is_none() {
            missing.push(SERPER_API_KEY);
        }
        let openai_api_key = get(OPENAI_API_KEY);
        if require_openai && openai_api_key.is_none() {
            missing.push(OPENAI_API_KEY);
        }
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            openai_api_key,
            serper_api_key: serper_api_key.unwrap_or_default(),
            openai_base_url: get(OPENAI_BASE_URL),
            openai_model: get(OPENAI_MODEL),
            fallacies_path: fallacies_path_from_lookup(&lookup),
        })
    }
}

/// `FALLACIES_PATH` after loading `.env`. Needs no API keys, so catalog-only
/// commands resolve the same file the server would.
pub fn fallacies_path_from_env() -> Option<PathBuf> {
    dotenvy::dotenv().ok();
    fallacies_path_from_lookup(|key| std::env::var(key).ok())
}

pub fn fallacies_path_from_lookup<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(FALLACIES_PATH)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
