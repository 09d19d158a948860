use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CritiqueConfig {
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Upper bound on one critique round trip, including retries. The
    /// execution proxy carries its own 10 s bound; this keeps the critique
    /// branch from dominating total pipeline latency.
    pub timeout: Duration,
}

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 2000,
            timeout: Duration::from_secs(30),
        }
    }
}

impl CritiqueConfig {
    /// Defaults overridden by `CRITIQUE_MODEL`, `CRITIQUE_TEMPERATURE` and
    /// `CRITIQUE_TIMEOUT_SECONDS` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = std::env::var("CRITIQUE_MODEL") {
            config.model = model;
        }

        if let Ok(temp) = std::env::var("CRITIQUE_TEMPERATURE") {
            if let Ok(t) = temp.parse::<f32>() {
                config.temperature = t;
            }
        }

        if let Ok(timeout) = std::env::var("CRITIQUE_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CritiqueConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
