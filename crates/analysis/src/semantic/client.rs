use crate::core::{
    Language, Priority, SemanticAnalysisResult, StaticAnalysisResult, Suggestion, SuggestionKind,
};
use crate::semantic::config::CritiqueConfig;
use crate::semantic::prompt::{self, SYSTEM_PROMPT};
use crate::semantic::provider::{CritiqueRequest, OpenAIProvider, TextProvider};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Capability object for the critique service: either holds a configured
/// provider or is permanently unavailable. Availability is decided once, at
/// construction, so calls never race an initialization step.
pub struct CritiqueClient {
    provider: Option<Arc<dyn TextProvider>>,
    config: CritiqueConfig,
}

impl CritiqueClient {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self::with_config(provider, CritiqueConfig::default())
    }

    pub fn with_config(provider: Arc<dyn TextProvider>, config: CritiqueConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// A client that always returns the degraded default without touching
    /// the network.
    pub fn unavailable() -> Self {
        Self {
            provider: None,
            config: CritiqueConfig::default(),
        }
    }

    /// Configure from the environment. A missing `OPENAI_API_KEY` yields an
    /// unavailable client; that is logged here, once, rather than on every
    /// call.
    pub fn from_env() -> Self {
        let config = CritiqueConfig::from_env();
        match OpenAIProvider::from_env(config.model.clone()) {
            Some(provider) => {
                info!(model = %config.model, "critique provider initialized");
                Self::with_config(Arc::new(provider), config)
            }
            None => {
                warn!("OPENAI_API_KEY not found, AI critique will be limited");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Critique `code`, folding the rule engine's findings into the prompt.
    /// Infallible by contract: every failure mode (unavailable provider,
    /// network error, timeout, unparseable reply) degrades to
    /// `SemanticAnalysisResult::unavailable()`.
    pub async fn critique(
        &self,
        code: &str,
        language: Language,
        static_result: &StaticAnalysisResult,
    ) -> SemanticAnalysisResult {
        let Some(provider) = &self.provider else {
            debug!("critique provider unavailable, returning default analysis");
            return SemanticAnalysisResult::unavailable();
        };

        let request = CritiqueRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: prompt::build_prompt(code, language, static_result),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let reply = tokio::time::timeout(self.config.timeout, provider.generate(request)).await;

        match reply {
            Ok(Ok(text)) => parse_reply(&text),
            Ok(Err(e)) => {
                warn!(error = %e, "critique provider failed, returning default analysis");
                SemanticAnalysisResult::unavailable()
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.timeout.as_secs(),
                    "critique call timed out, returning default analysis"
                );
                SemanticAnalysisResult::unavailable()
            }
        }
    }
}

/// Decode the model reply leniently. Fence markers are stripped first; a
/// reply that still fails to decode as JSON becomes the default result.
pub(crate) fn parse_reply(text: &str) -> SemanticAnalysisResult {
    let cleaned = strip_fences(text);

    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "failed to parse critique reply, returning default analysis");
            return SemanticAnalysisResult::unavailable();
        }
    };

    SemanticAnalysisResult {
        feedback: parsed
            .get("feedback")
            .and_then(Value::as_str)
            .unwrap_or("No feedback available")
            .to_string(),
        optimization_hints: string_array(parsed.get("optimizationHints")),
        readability_score: normalize_score(parsed.get("readabilityScore")),
        complexity_score: normalize_score(parsed.get("complexityScore")),
        suggestions: suggestion_array(parsed.get("suggestions")),
    }
}

fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Coerce an upstream score to the nearest integer in [0,100]; anything
/// non-numeric counts as 50 before clamping.
fn normalize_score(value: Option<&Value>) -> u8 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(50.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(50.0),
        _ => 50.0,
    };
    number.round().clamp(0.0, 100.0) as u8
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn suggestion_array(value: Option<&Value>) -> Vec<Suggestion> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|entry| Suggestion {
            kind: match entry.get("type").and_then(Value::as_str) {
                Some("performance") => SuggestionKind::Performance,
                Some("readability") => SuggestionKind::Readability,
                _ => SuggestionKind::BestPractice,
            },
            message: entry
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            priority: match entry.get("priority").and_then(Value::as_str) {
                Some("high") => Priority::High,
                Some("low") => Priority::Low,
                _ => Priority::Medium,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::semantic::mock_provider::MockTextProvider;

    const WELL_FORMED: &str = r#"{
        "feedback": "Tidy and direct.",
        "optimizationHints": ["Hoist the constant"],
        "readabilityScore": 85,
        "complexityScore": 20,
        "suggestions": [
            {"type": "performance", "message": "Cache the lookup", "priority": "high"}
        ]
    }"#;

    #[test]
    fn test_fenced_reply_parses_same_as_unfenced() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        assert_eq!(parse_reply(&fenced), parse_reply(WELL_FORMED));
        assert_eq!(parse_reply(WELL_FORMED).readability_score, 85);
    }

    #[test]
    fn test_non_json_reply_degrades_to_default() {
        let result = parse_reply("I could not analyze this code, sorry!");
        assert_eq!(result, SemanticAnalysisResult::unavailable());
        assert_eq!(result.readability_score, 50);
        assert_eq!(result.complexity_score, 50);
        assert!(result.optimization_hints.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_malformed_fields_normalized() {
        let reply = r#"{
            "optimizationHints": "not an array",
            "readabilityScore": "92",
            "complexityScore": 250,
            "suggestions": [{"message": "Name things"}]
        }"#;
        let result = parse_reply(reply);
        assert_eq!(result.feedback, "No feedback available");
        assert!(result.optimization_hints.is_empty());
        assert_eq!(result.readability_score, 92);
        assert_eq!(result.complexity_score, 100);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].kind, SuggestionKind::BestPractice);
        assert_eq!(result.suggestions[0].priority, Priority::Medium);
        assert_eq!(result.suggestions[0].message, "Name things");
    }

    #[test]
    fn test_non_numeric_score_becomes_fifty() {
        let result = parse_reply(r#"{"readabilityScore": "excellent", "complexityScore": null}"#);
        assert_eq!(result.readability_score, 50);
        assert_eq!(result.complexity_score, 50);
    }

    #[test]
    fn test_fractional_score_rounds() {
        let result = parse_reply(r#"{"readabilityScore": 84.6, "complexityScore": -3}"#);
        assert_eq!(result.readability_score, 85);
        assert_eq!(result.complexity_score, 0);
    }

    #[tokio::test]
    async fn test_unavailable_client_short_circuits() {
        let client = CritiqueClient::unavailable();
        let result = client
            .critique("x = 1", Language::Python, &StaticAnalysisResult::empty())
            .await;
        assert_eq!(result, SemanticAnalysisResult::unavailable());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let provider = Arc::new(MockTextProvider::failing());
        let client = CritiqueClient::new(provider.clone());
        let result = client
            .critique("x = 1", Language::Python, &StaticAnalysisResult::empty())
            .await;
        assert_eq!(result, SemanticAnalysisResult::unavailable());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_static_findings() {
        let provider = Arc::new(MockTextProvider::replying(WELL_FORMED));
        let client = CritiqueClient::new(provider.clone());
        let static_result = StaticAnalysisResult::from_diagnostics(vec![
            crate::core::Diagnostic::new(2, Severity::Warning, "Use === instead of =="),
        ]);
        let result = client
            .critique("if (x == 5) {}", Language::JavaScript, &static_result)
            .await;
        assert_eq!(result.feedback, "Tidy and direct.");

        let prompt = provider.last_prompt().expect("one call recorded");
        assert!(prompt.contains("Line 2: Use === instead of =="));
        assert!(prompt.contains("Errors:\nNone"));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_to_default() {
        let provider = Arc::new(MockTextProvider::replying(WELL_FORMED).with_delay(
            std::time::Duration::from_secs(60),
        ));
        let mut config = CritiqueConfig::default();
        config.timeout = std::time::Duration::from_millis(50);
        let client = CritiqueClient::with_config(provider, config);
        let result = client
            .critique("x = 1", Language::Python, &StaticAnalysisResult::empty())
            .await;
        assert_eq!(result, SemanticAnalysisResult::unavailable());
    }
}
