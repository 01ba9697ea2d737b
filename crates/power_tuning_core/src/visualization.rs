//! Visualization URL lookup in a tuning execution's output document.
//!
//! The workflow's output is loosely shaped, so the lookup walks an ordered
//! list of accessor strategies and falls through to a sentinel string. The
//! extractor never fails: every outcome is a displayable string.

use serde_json::Value;

pub const VISUALIZATION_NOT_FOUND: &str = "Visualization URL not found in output";
pub const VISUALIZATION_EXTRACTION_FAILED: &str = "Error extracting visualization URL";

/// A named JSON pointer into the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupStrategy {
    pub name: &'static str,
    pub pointer: &'static str,
}

pub const LOOKUP_STRATEGIES: [LookupStrategy; 2] = [
    LookupStrategy {
        name: "top_level",
        pointer: "/visualization",
    },
    LookupStrategy {
        name: "state_machine",
        pointer: "/stateMachine/visualization",
    },
];

/// Extracts the visualization reference from the raw output string of a
/// succeeded execution.
pub fn extract_visualization_url(raw_output: Option<&str>) -> String {
    let Some(raw_output) = raw_output else {
        tracing::warn!(
            component = "visualization",
            event = "output_missing",
            "succeeded execution returned no output document"
        );
        return VISUALIZATION_EXTRACTION_FAILED.to_string();
    };

    match serde_json::from_str::<Value>(raw_output) {
        Ok(document) => visualization_from_document(&document),
        Err(error) => {
            tracing::warn!(
                component = "visualization",
                event = "output_malformed",
                error = %error,
                "error extracting visualization URL"
            );
            VISUALIZATION_EXTRACTION_FAILED.to_string()
        }
    }
}

pub fn visualization_from_document(document: &Value) -> String {
    for strategy in LOOKUP_STRATEGIES {
        if let Some(value) = document.pointer(strategy.pointer) {
            tracing::debug!(
                component = "visualization",
                event = "visualization_found",
                strategy = strategy.name
            );
            return render_value(value);
        }
    }

    VISUALIZATION_NOT_FOUND.to_string()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefers_top_level_visualization() {
        let output = json!({
            "visualization": "http://x",
            "stateMachine": {"visualization": "http://y"}
        })
        .to_string();

        assert_eq!(extract_visualization_url(Some(output.as_str())), "http://x");
    }

    #[test]
    fn falls_back_to_state_machine_visualization() {
        let output = json!({"stateMachine": {"visualization": "http://y"}}).to_string();
        assert_eq!(extract_visualization_url(Some(output.as_str())), "http://y");
    }

    #[test]
    fn empty_document_returns_not_found_sentinel() {
        assert_eq!(
            extract_visualization_url(Some("{}")),
            VISUALIZATION_NOT_FOUND
        );
    }

    #[test]
    fn state_machine_without_visualization_is_not_found() {
        let output = json!({"stateMachine": {"executionCost": 0.0002}}).to_string();
        assert_eq!(
            extract_visualization_url(Some(output.as_str())),
            VISUALIZATION_NOT_FOUND
        );
    }

    #[test]
    fn non_object_document_is_not_found() {
        assert_eq!(
            extract_visualization_url(Some("[\"visualization\"]")),
            VISUALIZATION_NOT_FOUND
        );
    }

    #[test]
    fn malformed_document_returns_extraction_sentinel() {
        assert_eq!(
            extract_visualization_url(Some("{not json")),
            VISUALIZATION_EXTRACTION_FAILED
        );
        assert_eq!(
            extract_visualization_url(None),
            VISUALIZATION_EXTRACTION_FAILED
        );
    }

    #[test]
    fn non_string_values_render_as_json() {
        let document = json!({"visualization": {"url": "http://z"}});
        assert_eq!(
            visualization_from_document(&document),
            "{\"url\":\"http://z\"}"
        );
    }
}
