//! Transcript segments and synthetic segmentation for pasted text.

use serde::{Deserialize, Serialize};

/// Characters per synthesized segment when chunking pasted text.
pub const PASTE_CHUNK_CHARS: usize = 300;

/// Synthetic duration assigned to each pasted-text segment, in seconds.
pub const PASTE_SEGMENT_SECS: f64 = 15.0;

/// A time-boxed span of speech or text within a transcript.
///
/// Segments form an ordered sequence; insertion order is chronological
/// order. `end > start` for segments produced by any acquisition path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Sequence-unique identifier within one transcript.
    pub id: String,
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    /// Spoken or pasted text, non-empty after trimming.
    pub text: String,
    /// Optional speaker label (e.g. `"Speaker"`, `"YouTube Captions"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// Synthesize transcript segments from pasted text.
///
/// The text is split into chunks of [`PASTE_CHUNK_CHARS`] characters and
/// each chunk is assigned a synthetic 15-second window: segment `i` spans
/// `[i * 15, (i + 1) * 15)`. These timestamps are an explicit
/// approximation, not measured timing. Chunks that are empty after
/// trimming are dropped, so for ordinary text of length `L` the result
/// has `ceil(L / 300)` segments.
///
/// Deterministic and purely local; no network involved.
pub fn chunk_raw_text(raw: &str) -> Vec<TranscriptSegment> {
    let chars: Vec<char> = raw.chars().collect();
    let mut segments = Vec::with_capacity(chars.len() / PASTE_CHUNK_CHARS + 1);

    for chunk in chars.chunks(PASTE_CHUNK_CHARS) {
        let text: String = chunk.iter().collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let index = segments.len();
        segments.push(TranscriptSegment {
            id: (index + 1).to_string(),
            start: index as f64 * PASTE_SEGMENT_SECS,
            end: (index + 1) as f64 * PASTE_SEGMENT_SECS,
            text: text.to_string(),
            speaker: None,
        });
    }

    segments
}

/// Duration of a transcript: the end timestamp of its last segment,
/// or 0 when there are no segments.
pub fn transcript_duration(segments: &[TranscriptSegment]) -> f64 {
    segments.last().map(|s| s.end).unwrap_or(0.0)
}

/// Join segment texts into the full transcript string.
pub fn join_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_segments() {
        assert!(chunk_raw_text("").is_empty());
        assert!(chunk_raw_text("   \n\t  ").is_empty());
    }

    #[test]
    fn short_text_yields_single_segment() {
        let segments = chunk_raw_text("hello world");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "1");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 15.0);
        assert_eq!(segments[0].text, "hello world");
    }

    #[test]
    fn segment_count_is_ceil_of_length_over_chunk_size() {
        // 650 chars -> ceil(650 / 300) = 3 segments.
        let text = "A".repeat(650);
        let segments = chunk_raw_text(&text);
        assert_eq!(segments.len(), 3);

        let starts: Vec<f64> = segments.iter().map(|s| s.start).collect();
        let ends: Vec<f64> = segments.iter().map(|s| s.end).collect();
        assert_eq!(starts, vec![0.0, 15.0, 30.0]);
        assert_eq!(ends, vec![15.0, 30.0, 45.0]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_segment() {
        let text = "B".repeat(600);
        assert_eq!(chunk_raw_text(&text).len(), 2);
    }

    #[test]
    fn chunking_counts_chars_not_bytes() {
        // 301 multi-byte chars must split at the 300-char boundary,
        // not panic on a UTF-8 byte boundary.
        let text = "é".repeat(301);
        let segments = chunk_raw_text(&text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text.chars().count(), 300);
        assert_eq!(segments[1].text.chars().count(), 1);
    }

    #[test]
    fn ids_and_windows_are_sequential() {
        let text = "C".repeat(1000);
        let segments = chunk_raw_text(&text);
        assert_eq!(segments.len(), 4);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.id, (i + 1).to_string());
            assert_eq!(seg.start, i as f64 * 15.0);
            assert_eq!(seg.end, (i + 1) as f64 * 15.0);
            assert!(seg.end > seg.start);
        }
    }

    #[test]
    fn duration_is_last_segment_end() {
        let segments = chunk_raw_text(&"D".repeat(650));
        assert_eq!(transcript_duration(&segments), 45.0);
        assert_eq!(transcript_duration(&[]), 0.0);
    }

    #[test]
    fn join_text_spaces_segments() {
        let segments = vec![
            TranscriptSegment {
                id: "1".into(),
                start: 0.0,
                end: 5.0,
                text: "first part".into(),
                speaker: None,
            },
            TranscriptSegment {
                id: "2".into(),
                start: 5.0,
                end: 9.0,
                text: "second part".into(),
                speaker: None,
            },
        ];
        assert_eq!(join_text(&segments), "first part second part");
    }
}
