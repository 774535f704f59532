use serde::{Deserialize, Serialize};
use tracing::debug;
use ycs_core::error::{codes, AppError};

use super::Llm;
use crate::gemini::GeminiClient;

#[derive(Debug, Clone)]
pub struct GeminiLlm {
    client: GeminiClient,
}

impl GeminiLlm {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Clone, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
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

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

impl Llm for GeminiLlm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.client.base_url(),
            model
        );
        let req = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };
        debug!(model, prompt_chars = prompt.chars().count(), "calling generateContent");

        let resp = ureq::post(&url)
            .timeout(std::time::Duration::from_secs(120))
            .set("x-goog-api-key", self.client.api_key())
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new(codes::CLASSIFY_FAILED, "Failed to encode generate request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) => {
                let v: GenerateResponse = r.into_json().map_err(|e| {
                    AppError::new(codes::CLASSIFY_FAILED, "Failed to decode generate response")
                        .with_details(e.to_string())
                })?;
                let text = v.text();
                if text.trim().is_empty() {
                    let reason = v
                        .prompt_feedback
                        .as_ref()
                        .and_then(|f| f.block_reason.clone())
                        .or_else(|| v.candidates.first().and_then(|c| c.finish_reason.clone()))
                        .unwrap_or_else(|| "none".to_string());
                    return Err(AppError::new(
                        codes::CLASSIFY_EMPTY_RESPONSE,
                        "Generate response was empty",
                    )
                    .with_details(format!("reason={reason}")));
                }
                Ok(text)
            }
            Err(ureq::Error::Status(status, r)) => {
                let message = r
                    .into_json::<ApiErrorBody>()
                    .map(|b| b.error.message)
                    .unwrap_or_default();
                Err(
                    AppError::new(codes::CLASSIFY_FAILED, "Generate request was rejected")
                        .with_details(format!("status={status} message={message}"))
                        .with_retryable(status == 429 || status >= 500),
                )
            }
            Err(e) => Err(
                AppError::new(codes::CLASSIFY_FAILED, "Failed to call generate endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
