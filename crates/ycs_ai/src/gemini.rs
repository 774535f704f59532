use ycs_core::config::Config;
use ycs_core::error::{codes, AppError};
use ycs_core::net::{is_host_root, validate_base_url};

/// Connection settings for the Gemini generative-language API.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client. The base URL must be HTTPS, except `http://127.0.0.1[:port]` for local
    /// test servers. It is the host root; the API version path is added per request.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = validate_base_url(base_url, codes::AI_BASE_URL_INVALID)?;
        if !is_host_root(&base_url) {
            return Err(AppError::new(
                codes::AI_BASE_URL_INVALID,
                "Gemini base URL must be a bare host",
            )
            .with_details(format!("base_url={base_url}")));
        }

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::new(codes::CONFIG_MISSING_KEY, "Gemini API key is empty"));
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, AppError> {
        Self::new(&cfg.oracle_base_url, &cfg.oracle_api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Cheap authenticated call used to verify the key before a long classification run.
    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let resp = ureq::get(&url)
            .timeout(std::time::Duration::from_secs(5))
            .set("x-goog-api-key", &self.api_key)
            .query("pageSize", "1")
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new(codes::AI_GEMINI_UNHEALTHY, "Gemini health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(status, _)) => Err(
                AppError::new(codes::AI_GEMINI_UNHEALTHY, "Gemini rejected the health check")
                    .with_details(format!("status={status}")),
            ),
            Err(e) => Err(AppError::new(
                codes::AI_GEMINI_UNREACHABLE,
                "Failed to reach the Gemini API",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
