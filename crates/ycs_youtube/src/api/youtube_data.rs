use serde::Deserialize;
use tracing::debug;
use ycs_core::config::Config;
use ycs_core::error::{codes, AppError};
use ycs_core::net::validate_base_url;

use super::{CommentThreadsApi, CommentThreadsPage, CommentThreadsRequest};

/// Blocking client for the YouTube Data API v3 `commentThreads` resource.
#[derive(Clone)]
pub struct YoutubeDataApi {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for YoutubeDataApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeDataApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl YoutubeDataApi {
    /// `base_url` must be HTTPS; plain HTTP is only allowed for `127.0.0.1` test servers.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = validate_base_url(base_url, codes::CONFIG_INVALID)?;
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::new(
                codes::CONFIG_MISSING_KEY,
                "YouTube API key is empty",
            ));
        }
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, AppError> {
        Self::new(&cfg.youtube_base_url, &cfg.youtube_api_key)
    }
}

impl CommentThreadsApi for YoutubeDataApi {
    fn list_comment_threads(
        &self,
        req: &CommentThreadsRequest,
    ) -> Result<CommentThreadsPage, AppError> {
        let url = format!("{}/commentThreads", self.base_url);
        let max_results = req.max_results.to_string();
        debug!(video_id = %req.video_id, max_results = req.max_results, has_page_token = req.page_token.is_some(), "listing comment threads");

        // Key goes in a header so it never appears in URLs carried by transport errors.
        let mut request = ureq::get(&url)
            .timeout(std::time::Duration::from_secs(30))
            .set("X-Goog-Api-Key", &self.api_key)
            .query("part", "snippet")
            .query("videoId", req.video_id.as_str())
            .query("maxResults", &max_results);
        if let Some(token) = req.page_token.as_deref() {
            request = request.query("pageToken", token);
        }

        match request.call() {
            Ok(r) => r.into_json::<CommentThreadsPage>().map_err(|e| {
                AppError::new(codes::FETCH_DECODE_FAILED, "Failed to decode comment threads page")
                    .with_details(e.to_string())
            }),
            Err(ureq::Error::Status(status, r)) => {
                let message = r
                    .into_json::<ApiErrorBody>()
                    .map(|b| b.error.message)
                    .unwrap_or_default();
                Err(
                    AppError::new(codes::FETCH_API_ERROR, "Comment threads request was rejected")
                        .with_details(format!("status={status} message={message}"))
                        .with_retryable(status == 429 || status >= 500),
                )
            }
            Err(e) => Err(
                AppError::new(codes::FETCH_FAILED, "Failed to call comment threads endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
