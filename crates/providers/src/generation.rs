//! Gemini generation client: structured summary, lecture title, and
//! quiz questions.
//!
//! All three calls go through `generateContent` with a prompt that
//! demands bare JSON (or bare text, for titles). Responses are run
//! through [`extract`](crate::extract) before parsing because the
//! model does not always comply.

use async_trait::async_trait;
use lectern_core::{QuizQuestion, SummaryDocument};
use lectern_pipeline::traits::{QuizGenerator, Summarizer, SummaryOutput};
use lectern_pipeline::PipelineError;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::extract::{extract_json_array, extract_json_object};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

const MODEL: &str = "gemini-2.5-flash";

/// Transcript prefix length (in characters) fed to title generation.
const TITLE_INPUT_CHARS: usize = 10_000;

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
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

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<String>();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GenerationClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
        }
    }

    /// One `generateContent` round trip, returning the raw model text.
    async fn generate(&self, prompt: String) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, MODEL
        );
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "gemini",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| ProviderError::Malformed {
                provider: "gemini",
                message: e.to_string(),
            })?;
        parsed.text().ok_or(ProviderError::Malformed {
            provider: "gemini",
            message: "response carried no text".to_string(),
        })
    }

    async fn generate_summary(&self, transcript: &str) -> Result<SummaryDocument, ProviderError> {
        let response = self.generate(summary_prompt(transcript)).await?;
        let json = extract_json_object(&response);
        serde_json::from_str(&json).map_err(|e| ProviderError::Malformed {
            provider: "gemini",
            message: format!("summary JSON did not parse: {e}"),
        })
    }

    /// Best-effort title. Failures are logged and swallowed; the
    /// pipeline has filename and placeholder fallbacks.
    async fn generate_title(&self, transcript: &str) -> Option<String> {
        let prefix: String = transcript.chars().take(TITLE_INPUT_CHARS).collect();
        match self.generate(title_prompt(&prefix)).await {
            Ok(response) => {
                let title = response.trim().trim_matches('"').trim().to_string();
                if title.is_empty() {
                    None
                } else {
                    Some(title)
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "title generation failed, falling back");
                None
            }
        }
    }

    async fn request_quiz(
        &self,
        summary: &SummaryDocument,
    ) -> Result<Vec<QuizQuestion>, ProviderError> {
        let response = self.generate(quiz_prompt(summary)).await?;
        let json = extract_json_array(&response);
        serde_json::from_str(&json).map_err(|e| ProviderError::Malformed {
            provider: "gemini",
            message: format!("quiz JSON did not parse: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

fn summary_prompt(transcript: &str) -> String {
    format!(
        r#"You are an expert at analyzing lecture transcripts and creating comprehensive study guides.

Analyze the following lecture transcript and provide a structured summary in JSON format.

Transcript:
{transcript}

Return ONLY valid JSON in this exact format:
{{
  "executiveSummary": "A 2-3 sentence overview of the lecture",
  "keyTopics": [
    {{"timestamp": 0, "topic": "Topic name"}},
    {{"timestamp": 120, "topic": "Another topic"}}
  ],
  "takeaways": [
    "Key takeaway 1",
    "Key takeaway 2",
    "Key takeaway 3"
  ],
  "definitions": [
    {{"term": "Term", "definition": "Definition"}},
    {{"term": "Another term", "definition": "Its definition"}}
  ]
}}

Important: Return ONLY the JSON object, no markdown formatting, no explanations."#
    )
}

fn title_prompt(transcript_prefix: &str) -> String {
    format!(
        r#"Based on the following lecture transcript, generate a concise, descriptive, and academic title for the lecture (max 10 words).

Transcript:
{transcript_prefix}

Return ONLY the title text, no quotes, no markdown."#
    )
}

fn quiz_prompt(summary: &SummaryDocument) -> String {
    let topics = summary
        .key_topics
        .iter()
        .map(|t| t.topic.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"You are an expert at creating educational quiz questions.

Based on this lecture summary, create 5 multiple-choice quiz questions.

Summary:
{executive}

Key Topics:
{topics}

Return ONLY valid JSON in this exact format:
[
  {{
    "id": "1",
    "question": "Question text?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctAnswer": 0,
    "explanation": "Why this answer is correct",
    "difficulty": "easy"
  }}
]

Mix difficulty levels (2 easy, 2 medium, 1 hard).
Return ONLY the JSON array, no markdown formatting."#,
        executive = summary.executive_summary,
    )
}

// ---------------------------------------------------------------------------
// Adapter impls
// ---------------------------------------------------------------------------

#[async_trait]
impl Summarizer for GenerationClient {
    async fn summarize(&self, transcript_text: &str) -> Result<SummaryOutput, PipelineError> {
        let document = self.generate_summary(transcript_text).await?;
        let title = self.generate_title(transcript_text).await;
        Ok(SummaryOutput { document, title })
    }
}

#[async_trait]
impl QuizGenerator for GenerationClient {
    async fn generate_quiz(
        &self,
        summary: &SummaryDocument,
    ) -> Result<Vec<QuizQuestion>, PipelineError> {
        Ok(self.request_quiz(summary).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::summary::KeyTopic;

    #[test]
    fn response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}]}
            }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn quiz_prompt_names_topics() {
        let summary = SummaryDocument {
            executive_summary: "Water crosses membranes.".to_string(),
            key_topics: vec![
                KeyTopic {
                    timestamp: 0.0,
                    topic: "Osmosis".to_string(),
                },
                KeyTopic {
                    timestamp: 120.0,
                    topic: "Tonicity".to_string(),
                },
            ],
            takeaways: vec![],
            definitions: vec![],
        };
        let prompt = quiz_prompt(&summary);
        assert!(prompt.contains("Osmosis, Tonicity"));
        assert!(prompt.contains("Water crosses membranes."));
    }

    #[test]
    fn fenced_summary_response_parses() {
        let response = "```json\n{\"executiveSummary\": \"S.\", \"keyTopics\": [], \"takeaways\": [], \"definitions\": []}\n```";
        let document: SummaryDocument =
            serde_json::from_str(&extract_json_object(response)).unwrap();
        assert_eq!(document.executive_summary, "S.");
    }
}
