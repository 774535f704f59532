use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error codes shared by every crate in the workspace.
pub mod codes {
    pub const FETCH_INVALID_URL: &str = "FETCH_INVALID_URL";
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const FETCH_API_ERROR: &str = "FETCH_API_ERROR";
    pub const FETCH_DECODE_FAILED: &str = "FETCH_DECODE_FAILED";

    pub const CLASSIFY_FAILED: &str = "CLASSIFY_FAILED";
    pub const CLASSIFY_EMPTY_RESPONSE: &str = "CLASSIFY_EMPTY_RESPONSE";
    pub const CLASSIFY_INVALID_BATCH_SIZE: &str = "CLASSIFY_INVALID_BATCH_SIZE";
    pub const CLASSIFY_LABEL_COUNT_MISMATCH: &str = "CLASSIFY_LABEL_COUNT_MISMATCH";

    pub const SUMMARY_EMPTY_DATASET: &str = "SUMMARY_EMPTY_DATASET";

    pub const STORE_OPEN_FAILED: &str = "STORE_OPEN_FAILED";
    pub const STORE_WRITE_FAILED: &str = "STORE_WRITE_FAILED";
    pub const STORE_HEADERS_INVALID: &str = "STORE_HEADERS_INVALID";
    pub const STORE_PARSE_FAILED: &str = "STORE_PARSE_FAILED";
    pub const STORE_INVALID_SENTIMENT: &str = "STORE_INVALID_SENTIMENT";

    pub const CONFIG_MISSING_KEY: &str = "CONFIG_MISSING_KEY";
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    pub const AI_BASE_URL_INVALID: &str = "AI_BASE_URL_INVALID";
    pub const AI_GEMINI_UNHEALTHY: &str = "AI_GEMINI_UNHEALTHY";
    pub const AI_GEMINI_UNREACHABLE: &str = "AI_GEMINI_UNREACHABLE";
}

/// Single structured error shape used by the fetch, classify, store and summary layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
