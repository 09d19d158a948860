use crate::core::{Language, Severity};
use serde::{Deserialize, Serialize};

/// One analysis invocation. Owned by the pipeline call stack; the code must
/// be non-blank, which is the only request-level validation the core does.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: Language,
    pub execute: bool,
}

impl AnalysisRequest {
    pub fn new(
        code: impl Into<String>,
        language: Language,
        execute: bool,
    ) -> Result<Self, EmptyCode> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(EmptyCode);
        }
        Ok(Self {
            code,
            language,
            execute,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("code must not be empty")]
pub struct EmptyCode;

/// A single static-analysis finding. Lines are 1-indexed into the scanned
/// document. `rule` carries the lint identifier where one exists; the
/// structural balance checks omit it. Serialize-only: reports are produced
/// here and consumed elsewhere, and the `&'static str` rule id cannot
/// borrow from deserializer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    pub message: String,

    pub severity: Severity,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl Diagnostic {
    pub fn new(line: usize, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            message: message.into(),
            severity,
            rule: None,
        }
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticAnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub warnings: usize,
    pub error_count: usize,
}

impl StaticAnalysisResult {
    /// Counts are always derived from the diagnostic list, never set by hand.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        Self {
            diagnostics,
            warnings,
            error_count,
        }
    }

    pub fn empty() -> Self {
        Self::from_diagnostics(Vec::new())
    }

    pub fn info_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    Performance,
    Readability,
    BestPractice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticAnalysisResult {
    pub feedback: String,

    pub optimization_hints: Vec<String>,

    /// Always clamped into [0,100]; upstream garbage becomes 50.
    pub readability_score: u8,

    /// Always clamped into [0,100]; upstream garbage becomes 50.
    pub complexity_score: u8,

    pub suggestions: Vec<Suggestion>,
}

impl SemanticAnalysisResult {
    /// The degraded result standing in whenever the critique service cannot
    /// be reached or returns something unusable.
    pub fn unavailable() -> Self {
        Self {
            feedback: "AI analysis unavailable. Please check your API key configuration."
                .to_string(),
            optimization_hints: Vec::new(),
            readability_score: 50,
            complexity_score: 50,
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            output: None,
            error: Some(message.into()),
            execution_time_ms: None,
        }
    }
}

/// The finished verdict. Created once per `analyze` call and handed to the
/// caller; the core keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAnalysis {
    pub static_analysis: StaticAnalysisResult,

    pub semantic_analysis: SemanticAnalysisResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionResult>,

    pub overall_score: u8,
}
