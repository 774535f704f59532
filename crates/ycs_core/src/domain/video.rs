use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{codes, AppError};

fn watch_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"v=([A-Za-z0-9_-]{11})").expect("static regex"))
}

/// 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts the id from input carrying `v=<id>`; the first occurrence wins.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        if let Some(caps) = watch_param_re().captures(input) {
            return Ok(Self(caps[1].to_string()));
        }
        Err(
            AppError::new(codes::FETCH_INVALID_URL, "Invalid YouTube video URL")
                .with_details(format!("input={input}")),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
