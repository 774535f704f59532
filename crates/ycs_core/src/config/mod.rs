use serde::{Deserialize, Serialize};

use crate::error::{codes, AppError};

pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "YCS_GEMINI_MODEL";
pub const ENV_BATCH_SIZE: &str = "YCS_BATCH_SIZE";
pub const ENV_LANGUAGE_HINT: &str = "YCS_LANGUAGE_HINT";

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_LANGUAGE_HINT: &str = "Telugu or Telugu-English (code-mixed)";

/// How oracle labels are mapped back onto the comments of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAlignment {
    /// Labels are assigned in the order they appear; declared indices are ignored.
    #[default]
    Positional,
    /// Labels are keyed by their declared index; gaps become Unknown.
    ByIndex,
}

/// Explicit configuration passed to each component at construction.
///
/// Credentials are never logged; `Debug` redacts them.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub youtube_api_key: String,
    pub oracle_api_key: String,
    pub oracle_model: String,
    pub youtube_base_url: String,
    pub oracle_base_url: String,
    pub batch_size: usize,
    pub language_hint: String,
    pub label_alignment: LabelAlignment,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("youtube_api_key", &"<redacted>")
            .field("oracle_api_key", &"<redacted>")
            .field("oracle_model", &self.oracle_model)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("oracle_base_url", &self.oracle_base_url)
            .field("batch_size", &self.batch_size)
            .field("language_hint", &self.language_hint)
            .field("label_alignment", &self.label_alignment)
            .finish()
    }
}

impl Config {
    /// Config with both credentials set and every other option at its default.
    pub fn new(youtube_api_key: impl Into<String>, oracle_api_key: impl Into<String>) -> Self {
        Self {
            youtube_api_key: youtube_api_key.into(),
            oracle_api_key: oracle_api_key.into(),
            oracle_model: DEFAULT_GEMINI_MODEL.to_string(),
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            oracle_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            language_hint: DEFAULT_LANGUAGE_HINT.to_string(),
            label_alignment: LabelAlignment::default(),
        }
    }

    /// Build from a variable lookup with both credentials required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_requiring(lookup, &[ENV_YOUTUBE_API_KEY, ENV_GEMINI_API_KEY])
    }

    /// Build from a variable lookup. Empty values are treated as unset.
    ///
    /// Only the credentials named in `required` must be present; the others are left empty
    /// and rejected by the component constructor that needs them.
    pub fn from_lookup_requiring<F>(lookup: F, required: &[&str]) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| {
                AppError::new(codes::CONFIG_MISSING_KEY, "Required configuration value is not set")
                    .with_details(format!("variable={name}"))
            })
        };

        let credential = |name: &str| {
            if required.contains(&name) {
                require(name)
            } else {
                Ok(get(name).unwrap_or_default())
            }
        };

        let mut cfg = Config::new(credential(ENV_YOUTUBE_API_KEY)?, credential(ENV_GEMINI_API_KEY)?);
        if let Some(model) = get(ENV_GEMINI_MODEL) {
            cfg.oracle_model = model;
        }
        if let Some(raw) = get(ENV_BATCH_SIZE) {
            cfg.batch_size = raw.parse::<usize>().map_err(|e| {
                AppError::new(codes::CONFIG_INVALID, "Batch size must be a positive integer")
                    .with_details(format!("variable={ENV_BATCH_SIZE} value={raw}: {e}"))
            })?;
        }
        if let Some(hint) = get(ENV_LANGUAGE_HINT) {
            cfg.language_hint = hint;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.batch_size == 0 {
            return Err(AppError::new(
                codes::CONFIG_INVALID,
                "Batch size must be at least 1",
            ));
        }
        if self.oracle_model.trim().is_empty() {
            return Err(AppError::new(codes::CONFIG_INVALID, "Oracle model name is empty"));
        }
        Ok(())
    }
}
