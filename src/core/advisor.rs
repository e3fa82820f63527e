//! Strategy advisor - free-text questions answered by a hosted language model.
//!
//! Callers go through [`ask_advisor`], which always yields a displayable
//! string: a missing client, a failed request and an empty answer each map
//! to a fixed message. Nothing is retried.

use crate::{
    config::settings::AdvisorSettings,
    errors::{Error, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Shown when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str = "שגיאה: מפתח API חסר.";
/// Shown when the request fails for any reason.
pub const REQUEST_FAILED_MESSAGE: &str = "אירעה שגיאה בתקשורת עם היועץ האסטרטגי.";
/// Shown when the model returns no text.
pub const EMPTY_ANSWER_MESSAGE: &str = "לא התקבלה תשובה.";

const API_KEY_VAR: &str = "ADVISOR_API_KEY";

/// Anything that can answer a question with text.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String>;
}

/// Asks `advisor` and folds every failure into a fixed message.
pub async fn ask_advisor(advisor: Option<&dyn Advisor>, question: &str) -> String {
    let Some(advisor) = advisor else {
        return MISSING_KEY_MESSAGE.to_string();
    };

    match advisor.ask(question).await {
        Ok(answer) if answer.trim().is_empty() => EMPTY_ANSWER_MESSAGE.to_string(),
        Ok(answer) => answer,
        Err(e) => {
            error!("Advisor request failed: {e}");
            REQUEST_FAILED_MESSAGE.to_string()
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: String,
    settings: AdvisorSettings,
}

impl GeminiAdvisor {
    #[must_use]
    pub fn new(api_key: String, settings: AdvisorSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            settings,
        }
    }

    /// Builds a client from `ADVISOR_API_KEY`; `None` when the key is unset or blank.
    #[must_use]
    pub fn from_env(settings: &AdvisorSettings) -> Option<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        info!("Advisor enabled with model {}", settings.model);
        Some(Self::new(api_key, settings.clone()))
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn ask(&self, question: &str) -> Result<String> {
        let body = GenerateRequest::new(&self.settings.system_instruction, question);

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Advisor {
                message: format!(
                    "status {}: {}",
                    resp.status().as_u16(),
                    resp.text().await.unwrap_or_default()
                ),
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateRequest<'a> {
    fn new(system_instruction: &'a str, question: &'a str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: question }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
