//! Structured lecture summary produced by the text-generation provider.

use serde::{Deserialize, Serialize};

/// A key topic entry with the timestamp (seconds) where it begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTopic {
    pub timestamp: f64,
    pub topic: String,
}

/// A term/definition pair extracted from the lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

/// Structured summary of one lecture.
///
/// Produced by parsing a text-generation response that is expected but
/// not guaranteed to be well-formed JSON; the generation adapter fails
/// explicitly on malformed output rather than producing a half-filled
/// document. The AI-suggested title travels separately and is promoted
/// to the lecture's own title field -- it is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    /// 2-3 sentence overview of the lecture.
    pub executive_summary: String,
    /// Ordered topics with their approximate timestamps.
    pub key_topics: Vec<KeyTopic>,
    /// Ordered short takeaway strings.
    pub takeaways: Vec<String>,
    /// Ordered term definitions.
    pub definitions: Vec<Definition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expected_json_shape() {
        let json = r#"{
            "executiveSummary": "An overview.",
            "keyTopics": [{"timestamp": 0, "topic": "Intro"}],
            "takeaways": ["First takeaway"],
            "definitions": [{"term": "Osmosis", "definition": "Diffusion of water"}]
        }"#;
        let doc: SummaryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.key_topics[0].topic, "Intro");
        assert_eq!(doc.definitions[0].term, "Osmosis");
    }

    #[test]
    fn missing_field_fails_to_parse() {
        // A half-filled document must be a parse error, not a default.
        let json = r#"{"executiveSummary": "Only this"}"#;
        assert!(serde_json::from_str::<SummaryDocument>(json).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let doc = SummaryDocument {
            executive_summary: "s".into(),
            key_topics: vec![],
            takeaways: vec![],
            definitions: vec![],
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("executiveSummary").is_some());
        assert!(value.get("keyTopics").is_some());
    }
}
