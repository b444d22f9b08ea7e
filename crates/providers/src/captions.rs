//! YouTube caption retrieval.
//!
//! No official API is involved. The primary strategy scrapes the watch
//! page for its `captionTracks` JSON and downloads the referenced
//! timedtext XML; the fallback asks the legacy timedtext endpoint
//! directly. Strategies are tried in order and the first one that
//! produces segments wins.

use async_trait::async_trait;
use lectern_core::TranscriptSegment;
use lectern_pipeline::traits::CaptionSource;
use lectern_pipeline::PipelineError;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::ProviderError;

/// Segment label; YouTube captions carry no speaker identity.
const SPEAKER_LABEL: &str = "YouTube Captions";

/// Desktop browser UA for the watch-page fetch. Datacenter requests
/// without one get a consent interstitial instead of the player page.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .unwrap()
    })
}

fn caption_tracks_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""captionTracks":\s*(\[.*?\])"#).unwrap())
}

fn timedtext_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<text start="([\d.]+)" dur="([\d.]+)"[^>]*>(.*?)</text>"#).unwrap()
    })
}

/// Pull the 11-character video ID out of a watch/short/embed URL, or
/// accept a bare ID as-is.
pub fn extract_video_id(url_or_id: &str) -> Option<String> {
    let trimmed = url_or_id.trim();
    if trimmed.len() == 11 && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(trimmed.to_string());
    }
    video_id_regex()
        .captures(trimmed)
        .map(|caps| caps[1].to_string())
}

/// One entry of the watch page's `captionTracks` array.
#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Prefer the English track, otherwise take the first.
fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == "en")
        .or_else(|| tracks.first())
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Parse timedtext XML into 0-indexed segments.
fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    timedtext_regex()
        .captures_iter(xml)
        .enumerate()
        .filter_map(|(index, caps)| {
            let start: f64 = caps[1].parse().ok()?;
            let duration: f64 = caps[2].parse().ok()?;
            Some(TranscriptSegment {
                id: index.to_string(),
                start,
                end: start + duration,
                text: decode_entities(&caps[3]),
                speaker: Some(SPEAKER_LABEL.to_string()),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

#[async_trait]
trait CaptionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        client: &reqwest::Client,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, ProviderError>;
}

/// Scrape the watch page for caption tracks, then fetch the chosen
/// track's XML.
struct WatchPageStrategy;

#[async_trait]
impl CaptionStrategy for WatchPageStrategy {
    fn name(&self) -> &'static str {
        "watch-page"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, ProviderError> {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        let response = client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "youtube",
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let html = response.text().await?;

        let tracks_json = caption_tracks_regex()
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .ok_or(ProviderError::Malformed {
                provider: "youtube",
                message: "watch page carries no captionTracks".to_string(),
            })?;
        let tracks: Vec<CaptionTrack> =
            serde_json::from_str(&tracks_json).map_err(|e| ProviderError::Malformed {
                provider: "youtube",
                message: format!("captionTracks JSON did not parse: {e}"),
            })?;
        let track = select_track(&tracks).ok_or(ProviderError::Malformed {
            provider: "youtube",
            message: "captionTracks array is empty".to_string(),
        })?;

        let xml = client.get(&track.base_url).send().await?.text().await?;
        let segments = parse_timedtext(&xml);
        if segments.is_empty() {
            return Err(ProviderError::Malformed {
                provider: "youtube",
                message: "caption XML was empty or malformed".to_string(),
            });
        }
        Ok(segments)
    }
}

/// Ask the legacy timedtext endpoint directly for English captions.
struct TimedTextStrategy;

#[async_trait]
impl CaptionStrategy for TimedTextStrategy {
    fn name(&self) -> &'static str {
        "timedtext"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, ProviderError> {
        let url = format!("https://video.google.com/timedtext?lang=en&v={video_id}");
        let xml = client.get(&url).send().await?.text().await?;
        let segments = parse_timedtext(&xml);
        if segments.is_empty() {
            return Err(ProviderError::Malformed {
                provider: "youtube",
                message: "timedtext endpoint returned no segments".to_string(),
            });
        }
        Ok(segments)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Ordered caption strategy chain.
pub struct CaptionClient {
    client: reqwest::Client,
    strategies: Vec<Box<dyn CaptionStrategy>>,
}

impl CaptionClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            strategies: vec![Box::new(WatchPageStrategy), Box::new(TimedTextStrategy)],
        }
    }

    async fn fetch_all(&self, url: &str) -> Result<Vec<TranscriptSegment>, ProviderError> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| ProviderError::InvalidVideoUrl(url.to_string()))?;

        for strategy in &self.strategies {
            match strategy.fetch(&self.client, &video_id).await {
                Ok(segments) => {
                    tracing::debug!(
                        video_id,
                        strategy = strategy.name(),
                        segments = segments.len(),
                        "captions fetched"
                    );
                    return Ok(segments);
                }
                Err(err) => {
                    tracing::debug!(
                        video_id,
                        strategy = strategy.name(),
                        error = %err,
                        "caption strategy failed"
                    );
                }
            }
        }
        Err(ProviderError::CaptionsUnavailable(video_id))
    }
}

#[async_trait]
impl CaptionSource for CaptionClient {
    async fn fetch_transcript(&self, url: &str) -> Result<Vec<TranscriptSegment>, PipelineError> {
        Ok(self.fetch_all(url).await?)
    }
}
