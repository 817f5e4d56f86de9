//! Google's public translate endpoint
//!
//! `GET translate_a/single?client=gtx&sl=..&tl=..&dt=t&q=..` answers with a
//! nested JSON array whose first element lists translated segments.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tlumach_engine::{TranslateError, TranslationRequest, Translator};

/// Texts shorter than this (trimmed, in chars) are returned unchanged
const MIN_TRANSLATABLE_CHARS: usize = 3;

/// Translator backed by `translate.googleapis.com`
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl GoogleTranslator {
    /// Create a translator for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// The endpoint requests go to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, error: reqwest::Error) -> TranslateError {
        if error.is_timeout() {
            TranslateError::Timeout(self.timeout)
        } else {
            TranslateError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let text = collapse_whitespace(&request.text);
        if text.chars().count() < MIN_TRANSLATABLE_CHARS {
            return Ok(request.text.clone());
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", request.pair.source.as_str()),
                ("tl", request.pair.target.as_str()),
                ("dt", "t"),
                ("q", text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslateError::RateLimited),
            status if !status.is_success() => {
                return Err(TranslateError::Backend(format!("HTTP {status}")))
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;
        parse_response(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Collapse runs of spaces and tabs, keep line breaks
pub fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Join the translated segments of a response
pub fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        Err(TranslateError::EmptyResult)
    } else {
        Ok(translated)
    }
}
