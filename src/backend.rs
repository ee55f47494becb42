/// HTTP client for the summary/chat backend
use crate::error::BackendError;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use url::Url;

/// Shown when a failed summary response carries no `detail`
pub const SUMMARY_FAILED: &str = "Failed to fetch summary";

/// Shown for any failed chat response
pub const CHAT_FAILED: &str = "Failed to get response";

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    url: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> BackendClient {
        BackendClient {
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base, keeping any path prefix the base has
    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// POST /summary and return the raw summary text
    pub async fn fetch_summary(&self, page_url: &str) -> Result<String, BackendError> {
        let endpoint = self.endpoint("summary")?;
        let (status, raw) = post_json(&endpoint, &SummaryRequest { url: page_url }).await?;
        decode_summary(status, &raw)
    }

    /// POST /chat and return the answer text
    pub async fn ask(&self, page_url: &str, question: &str) -> Result<String, BackendError> {
        let endpoint = self.endpoint("chat")?;
        let body = ChatRequest {
            url: page_url,
            question,
        };
        let (status, raw) = post_json(&endpoint, &body).await?;
        decode_answer(status, &raw)
    }
}

async fn post_json<T: Serialize>(endpoint: &Url, body: &T) -> Result<(u16, String), BackendError> {
    log::debug!("POST {}", endpoint);

    let response = Request::post(endpoint.as_str())
        .json(body)?
        .send()
        .await?;

    let status = response.status();
    let raw = response.text().await?;
    log::debug!("POST {} -> {}", endpoint, status);

    Ok((status, raw))
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

pub(crate) fn decode_summary(status: u16, raw: &str) -> Result<String, BackendError> {
    if !is_success(status) {
        let message = serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.detail)
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| SUMMARY_FAILED.to_string());
        return Err(BackendError::Status { status, message });
    }

    let response: SummaryResponse = serde_json::from_str(raw)
        .map_err(|e| BackendError::Decode(format!("Invalid summary response: {}", e)))?;
    Ok(response.summary)
}

pub(crate) fn decode_answer(status: u16, raw: &str) -> Result<String, BackendError> {
    if !is_success(status) {
        return Err(BackendError::Status {
            status,
            message: CHAT_FAILED.to_string(),
        });
    }

    let response: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| BackendError::Decode(format!("Invalid chat response: {}", e)))?;
    Ok(response.answer)
}
