//! JSON extraction from LLM chat output.
//!
//! Generation models are asked for bare JSON but routinely wrap it in
//! prose or a ```json fence. Extraction slices from the first opening
//! delimiter to the last closing one; if neither is present, fences are
//! stripped and the remainder returned as-is for the parser to judge.

/// Extract the JSON object embedded in `response`.
pub fn extract_json_object(response: &str) -> String {
    extract_delimited(response, '{', '}')
}

/// Extract the JSON array embedded in `response`.
pub fn extract_json_array(response: &str) -> String {
    extract_delimited(response, '[', ']')
}

fn extract_delimited(response: &str, open: char, close: char) -> String {
    let trimmed = response.trim();
    match (trimmed.find(open), trimmed.rfind(close)) {
        (Some(first), Some(last)) if last > first => trimmed[first..=last].to_string(),
        _ => trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_passes_through() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn object_inside_prose_is_sliced_out() {
        let response = "Sure! Here is the JSON you asked for:\n{\"a\": 1}\nHope that helps.";
        assert_eq!(extract_json_object(response), r#"{"a": 1}"#);
    }

    #[test]
    fn fenced_object_is_sliced_out() {
        let response = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(response), r#"{"a": 1}"#);
    }

    #[test]
    fn outermost_braces_win_with_nesting() {
        let response = "prefix {\"a\": {\"b\": 2}} suffix";
        assert_eq!(extract_json_object(response), r#"{"a": {"b": 2}}"#);
    }

    #[test]
    fn array_is_sliced_out() {
        let response = "```json\n[{\"id\": \"1\"}]\n```";
        assert_eq!(extract_json_array(response), r#"[{"id": "1"}]"#);
    }

    #[test]
    fn no_delimiters_falls_back_to_fence_stripping() {
        assert_eq!(extract_json_object("```json\nnull\n```"), "null");
    }
}
