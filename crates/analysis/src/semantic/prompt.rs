use crate::core::{Language, Severity, StaticAnalysisResult};

pub const SYSTEM_PROMPT: &str =
    "You are an expert code reviewer. You reply with a single JSON object and nothing else.";

/// Builds the critique prompt: language, verbatim source, and a two-part
/// summary of the rule engine's error/warning diagnostics. The reply schema
/// mirrors `SemanticAnalysisResult` exactly.
pub fn build_prompt(
    code: &str,
    language: Language,
    static_result: &StaticAnalysisResult,
) -> String {
    let errors_summary = severity_summary(static_result, Severity::Error);
    let warnings_summary = severity_summary(static_result, Severity::Warning);

    format!(
        r#"You are an expert code reviewer analyzing {language} code. Provide a comprehensive analysis in the following JSON format:

{{
  "feedback": "Overall assessment of the code quality, structure, and maintainability (2-3 sentences)",
  "optimizationHints": ["Hint 1", "Hint 2", "Hint 3"],
  "readabilityScore": 85,
  "complexityScore": 65,
  "suggestions": [
    {{
      "type": "performance",
      "message": "Specific suggestion",
      "priority": "high"
    }}
  ]
}}

Code to analyze:
```{language}
{code}
```

Static Analysis Findings:
Errors:
{errors_summary}

Warnings:
{warnings_summary}

Provide specific, actionable feedback. Focus on:
1. Code quality and best practices
2. Performance optimizations
3. Readability improvements
4. Security considerations
5. Maintainability

Return ONLY valid JSON, no markdown formatting."#
    )
}

/// `Line N: message` per diagnostic of the given severity, or the literal
/// token "None" when the category is empty.
fn severity_summary(static_result: &StaticAnalysisResult, severity: Severity) -> String {
    let summary = static_result
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| format!("Line {}: {}", d.line, d.message))
        .collect::<Vec<_>>()
        .join("\n");

    if summary.is_empty() {
        "None".to_string()
    } else {
        summary
    }
}
