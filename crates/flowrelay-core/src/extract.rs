//! Chat message extraction from flow engine responses.
//!
//! The flow engine returns a deeply nested JSON document whose shape has
//! changed between releases. [`ResponseExtractor`] tries an ordered list of
//! [`ExtractionStrategy`] values, each a pure path lookup, and takes the first
//! non-blank message text it finds. When nothing matches it degrades to
//! [`FALLBACK_RESPONSE`] instead of failing the request.
//!
//! Known shapes, in search order:
//!
//! ```text
//! primary: outputs[0].outputs[i].results.message.text
//! legacy:  outputs[j].results.message.text
//! ```

use std::fmt;

use serde_json::Value;

use crate::types::{AgentType, RawFlowResponse};

/// Text returned when no strategy finds a message.
pub const FALLBACK_RESPONSE: &str = "I apologise, but I couldn't process your request.";

/// Maximum number of characters of a matched message included in logs.
const LOG_PREVIEW_CHARS: usize = 100;

/// One candidate location of the chat text inside a flow engine response.
#[derive(Clone, Copy)]
pub struct ExtractionStrategy {
    /// Short name used in logs and in [`Extraction::strategy`].
    pub name: &'static str,
    /// Returns the message text if this shape is present and non-blank.
    pub find: fn(&Value) -> Option<&str>,
}

impl fmt::Debug for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Current flow engine layout: the chat text sits in one of the nested
/// components of the first top-level output.
pub const PRIMARY: ExtractionStrategy = ExtractionStrategy {
    name: "primary",
    find: find_primary,
};

/// Older layout, one level shallower.
pub const LEGACY: ExtractionStrategy = ExtractionStrategy {
    name: "legacy",
    find: find_legacy,
};

pub const DEFAULT_STRATEGIES: [ExtractionStrategy; 2] = [PRIMARY, LEGACY];

fn find_primary(raw: &Value) -> Option<&str> {
    raw.get("outputs")?
        .as_array()?
        .first()?
        .get("outputs")?
        .as_array()?
        .iter()
        .find_map(message_text)
}

fn find_legacy(raw: &Value) -> Option<&str> {
    raw.get("outputs")?.as_array()?.iter().find_map(message_text)
}

/// `component.results.message.text`, if it is a string with visible content.
fn message_text(component: &Value) -> Option<&str> {
    component
        .get("results")?
        .get("message")?
        .get("text")?
        .as_str()
        .filter(|text| !text.trim().is_empty())
}

/// Outcome of [`ResponseExtractor::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The message text, untrimmed, or [`FALLBACK_RESPONSE`].
    pub text: String,
    pub agent_type: AgentType,
    /// Name of the strategy that matched; `None` for the fallback.
    pub strategy: Option<&'static str>,
}

impl Extraction {
    fn fallback() -> Self {
        Extraction {
            text: FALLBACK_RESPONSE.to_string(),
            agent_type: AgentType::General,
            strategy: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.strategy.is_none()
    }
}

/// Ordered list of extraction strategies; the first match wins.
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    strategies: Vec<ExtractionStrategy>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::with_strategies(DEFAULT_STRATEGIES.to_vec())
    }
}

impl ResponseExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<ExtractionStrategy>) -> Self {
        ResponseExtractor { strategies }
    }

    pub fn strategies(&self) -> &[ExtractionStrategy] {
        &self.strategies
    }

    /// Finds the chat text in `raw`.
    ///
    /// `_original_message` is accepted for future classification and is not
    /// consulted.
    pub fn extract(&self, raw: &RawFlowResponse, _original_message: &str) -> Extraction {
        for strategy in &self.strategies {
            if let Some(text) = (strategy.find)(raw) {
                tracing::debug!(
                    strategy = strategy.name,
                    preview = %preview(text),
                    "found chat response"
                );
                return Extraction {
                    text: text.to_string(),
                    agent_type: AgentType::Chat,
                    strategy: Some(strategy.name),
                };
            }
        }

        tracing::warn!("no chat response found in flow output, using fallback");
        Extraction::fallback()
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn primary_shape(texts: &[Value]) -> Value {
        let components: Vec<Value> = texts
            .iter()
            .map(|text| json!({ "results": { "message": { "text": text } } }))
            .collect();
        json!({ "outputs": [ { "inputs": {}, "outputs": components } ] })
    }

    fn legacy_shape(texts: &[Value]) -> Value {
        let outputs: Vec<Value> = texts
            .iter()
            .map(|text| json!({ "results": { "message": { "text": text } } }))
            .collect();
        json!({ "outputs": outputs })
    }

    #[test]
    fn primary_shape_is_found() {
        let raw = primary_shape(&[json!("Hello")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Hello");
        assert_eq!(out.agent_type, AgentType::Chat);
        assert_eq!(out.strategy, Some("primary"));
    }

    #[test]
    fn legacy_shape_is_found() {
        let raw = legacy_shape(&[json!("Legacy")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Legacy");
        assert_eq!(out.agent_type, AgentType::Chat);
        assert_eq!(out.strategy, Some("legacy"));
    }

    #[test]
    fn empty_outputs_fall_back() {
        let out = ResponseExtractor::new().extract(&json!({ "outputs": [] }), "hi");
        assert_eq!(out.text, FALLBACK_RESPONSE);
        assert_eq!(out.agent_type, AgentType::General);
        assert!(out.is_fallback());
    }

    #[test]
    fn missing_outputs_fall_back() {
        let out = ResponseExtractor::new().extract(&json!({ "session_id": "s" }), "hi");
        assert!(out.is_fallback());
    }

    #[test]
    fn non_object_response_falls_back() {
        for raw in [json!(null), json!("text"), json!([1, 2, 3]), json!(42)] {
            let out = ResponseExtractor::new().extract(&raw, "hi");
            assert!(out.is_fallback(), "expected fallback for {}", raw);
        }
    }

    #[test]
    fn wrong_types_along_the_path_fall_back() {
        let cases = [
            json!({ "outputs": "not-a-list" }),
            json!({ "outputs": [ { "outputs": { "results": {} } } ] }),
            json!({ "outputs": [ { "results": "nope" } ] }),
            json!({ "outputs": [ { "results": { "message": [] } } ] }),
        ];
        for raw in cases {
            let out = ResponseExtractor::new().extract(&raw, "hi");
            assert!(out.is_fallback(), "expected fallback for {}", raw);
        }
    }

    #[test]
    fn non_string_text_is_skipped() {
        let raw = primary_shape(&[json!(17), json!("Second")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Second");
    }

    #[test]
    fn first_non_blank_component_wins() {
        let raw = primary_shape(&[json!("  "), json!("First"), json!("Second")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "First");
    }

    #[test]
    fn primary_is_preferred_over_legacy() {
        let raw = json!({
            "outputs": [{
                "results": { "message": { "text": "Legacy" } },
                "outputs": [ { "results": { "message": { "text": "Primary" } } } ]
            }]
        });
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Primary");
        assert_eq!(out.strategy, Some("primary"));
    }

    #[test]
    fn blank_primary_continues_to_legacy() {
        let raw = json!({
            "outputs": [{
                "results": { "message": { "text": "Legacy" } },
                "outputs": [ { "results": { "message": { "text": "\n\t" } } } ]
            }]
        });
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Legacy");
        assert_eq!(out.strategy, Some("legacy"));
    }

    #[test]
    fn primary_only_searches_first_output() {
        let raw = json!({
            "outputs": [
                { "outputs": [] },
                { "outputs": [ { "results": { "message": { "text": "Too deep" } } } ] }
            ]
        });
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert!(out.is_fallback());
    }

    #[test]
    fn legacy_searches_every_output() {
        let raw = legacy_shape(&[json!(""), json!("Later")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "Later");
    }

    #[test]
    fn matched_text_is_returned_untrimmed() {
        let raw = primary_shape(&[json!("  padded answer\n")]);
        let out = ResponseExtractor::new().extract(&raw, "hi");
        assert_eq!(out.text, "  padded answer\n");
    }

    #[test]
    fn original_message_does_not_change_the_outcome() {
        let raw = primary_shape(&[json!("Hello")]);
        let extractor = ResponseExtractor::new();
        assert_eq!(extractor.extract(&raw, "a"), extractor.extract(&raw, "something else"));
    }

    #[test]
    fn custom_strategy_list_is_respected() {
        let raw = primary_shape(&[json!("Hello")]);
        let legacy_only = ResponseExtractor::with_strategies(vec![LEGACY]);
        assert!(legacy_only.extract(&raw, "hi").is_fallback());
        assert_eq!(legacy_only.strategies().len(), 1);
    }

    proptest! {
        #[test]
        fn whitespace_only_text_is_never_returned(blank in "[ \t\r\n]{0,12}") {
            let extractor = ResponseExtractor::new();
            let primary = extractor.extract(&primary_shape(&[json!(blank.clone())]), "hi");
            let legacy = extractor.extract(&legacy_shape(&[json!(blank)]), "hi");
            prop_assert!(primary.is_fallback());
            prop_assert!(legacy.is_fallback());
        }

        #[test]
        fn visible_text_is_returned_verbatim(text in "[ ]{0,3}[a-zA-Z0-9?!.]{1,40}[ ]{0,3}") {
            let out = ResponseExtractor::new().extract(&primary_shape(&[json!(text.clone())]), "hi");
            prop_assert_eq!(out.text, text);
            prop_assert_eq!(out.agent_type, AgentType::Chat);
        }
    }
}
