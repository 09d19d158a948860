//! End-to-end pipeline behavior against scripted and failing collaborators.
//!
//! No test here talks to a real network service: the critique side uses the
//! mock provider and the sandbox side points at a port nothing listens on,
//! which exercises the degraded paths deterministically.

use critiq_analysis::{
    analyze_static, AnalysisRequest, Analyzer, CritiqueClient, Language, MockTextProvider,
    SandboxClient, SemanticAnalysisResult, Severity,
};
use std::sync::Arc;

const CRITIQUE_REPLY: &str = r#"{
    "feedback": "Straightforward script with minor style issues.",
    "optimizationHints": ["Prefer strict equality"],
    "readabilityScore": 80,
    "complexityScore": 30,
    "suggestions": [
        {"type": "best-practice", "message": "Use ===", "priority": "medium"}
    ]
}"#;

fn analyzer_with(provider: Arc<MockTextProvider>) -> Analyzer {
    Analyzer::new(
        CritiqueClient::new(provider),
        SandboxClient::new("http://127.0.0.1:1"),
    )
}

fn offline_analyzer() -> Analyzer {
    Analyzer::new(
        CritiqueClient::unavailable(),
        SandboxClient::new("http://127.0.0.1:1"),
    )
}

#[tokio::test]
async fn analyze_never_fails_with_all_dependencies_down() {
    // Credential absent and sandbox unreachable: still a full verdict.
    let analyzer = offline_analyzer();
    for language in Language::ALL {
        let analysis = analyzer
            .analyze_parts("int main() { return 0; }", language, true)
            .await
            .unwrap();
        assert!(analysis.overall_score <= 100, "{language}");
        assert_eq!(
            analysis.semantic_analysis,
            SemanticAnalysisResult::unavailable()
        );
        let execution = analysis.execution.expect("execution was requested");
        assert!(execution.error.is_some());
    }
}

#[tokio::test]
async fn failing_critique_branch_leaves_execution_result_intact() {
    // The join must not be all-or-nothing: inject a critique failure and the
    // execution branch's (degraded) result still surfaces.
    let analyzer = analyzer_with(Arc::new(MockTextProvider::failing()));
    let analysis = analyzer
        .analyze_parts("print(1)", Language::Python, true)
        .await
        .unwrap();

    assert_eq!(
        analysis.semantic_analysis,
        SemanticAnalysisResult::unavailable()
    );
    let execution = analysis.execution.expect("execution branch survived");
    assert!(execution.error.is_some());
}

#[tokio::test]
async fn scenario_javascript_loose_equality() {
    let provider = Arc::new(MockTextProvider::replying(CRITIQUE_REPLY));
    let analyzer = analyzer_with(provider.clone());

    let request =
        AnalysisRequest::new("if (x == 5) { console.log(x); }", Language::JavaScript, false)
            .unwrap();
    let analysis = analyzer.analyze(&request).await.unwrap();

    let diags = &analysis.static_analysis.diagnostics;
    assert_eq!(analysis.static_analysis.error_count, 0);
    assert_eq!(analysis.static_analysis.warnings, 1);
    assert_eq!(diags[0].line, 1);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[1].line, 1);
    assert_eq!(diags[1].severity, Severity::Info);

    // The critique parsed, so its scores flow into the blend:
    // structural 100-3-1=96 -> 0.4*96 + 0.3*80 + 0.3*70 = 83.4 -> 83
    assert_eq!(analysis.overall_score, 83);

    // The prompt embedded the warning summary for the model.
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("Line 1: Use === instead of =="));
}

#[tokio::test]
async fn scenario_python_missing_docstring() {
    let analyzer = offline_analyzer();
    let analysis = analyzer
        .analyze_parts("def f():\n    pass", Language::Python, false)
        .await
        .unwrap();

    let infos: Vec<_> = analysis
        .static_analysis
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Info)
        .collect();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].line, 1);
    assert!(infos[0].message.contains("docstring"));
}

#[tokio::test]
async fn scenario_cpp_cout_without_include() {
    let analyzer = offline_analyzer();
    let code = "int main() { std::cout << \"hi\"; return 0; }";
    let analysis = analyzer
        .analyze_parts(code, Language::Cpp, false)
        .await
        .unwrap();

    assert_eq!(analysis.static_analysis.error_count, 1);
    // One error takes the structural term from 100 to 90; with the neutral
    // semantic defaults: 0.4*90 + 30 = 66 versus 70 for clean input.
    assert_eq!(analysis.overall_score, 66);
}

#[tokio::test]
async fn execution_penalty_applies_exactly_twenty() {
    // Same code, execution on (unreachable sandbox -> error) vs. off.
    let analyzer = offline_analyzer();
    let with_exec = analyzer
        .analyze_parts("x = 1\nprint(x)", Language::Python, true)
        .await
        .unwrap();
    let without_exec = analyzer
        .analyze_parts("x = 1\nprint(x)", Language::Python, false)
        .await
        .unwrap();

    assert_eq!(without_exec.overall_score - with_exec.overall_score, 20);
}

#[tokio::test]
async fn fenced_and_unfenced_replies_are_equivalent() {
    let fenced = format!("```json\n{CRITIQUE_REPLY}\n```");

    let plain = analyzer_with(Arc::new(MockTextProvider::replying(CRITIQUE_REPLY)))
        .analyze_parts("x = 1\nprint(x)", Language::Python, false)
        .await
        .unwrap();
    let wrapped = analyzer_with(Arc::new(MockTextProvider::replying(fenced)))
        .analyze_parts("x = 1\nprint(x)", Language::Python, false)
        .await
        .unwrap();

    assert_eq!(plain.semantic_analysis, wrapped.semantic_analysis);
    assert_eq!(plain.overall_score, wrapped.overall_score);
}

#[tokio::test]
async fn malformed_critique_reply_degrades_to_default() {
    let provider = Arc::new(MockTextProvider::replying("Sorry, here is prose instead."));
    let analyzer = analyzer_with(provider);
    let analysis = analyzer
        .analyze_parts("x = 1\nprint(x)", Language::Python, false)
        .await
        .unwrap();

    assert_eq!(analysis.semantic_analysis.readability_score, 50);
    assert_eq!(analysis.semantic_analysis.complexity_score, 50);
    assert!(analysis.semantic_analysis.optimization_hints.is_empty());
    assert!(analysis.semantic_analysis.suggestions.is_empty());
}

#[tokio::test]
async fn heavily_broken_document_clamps_to_zero() {
    // 20 cout-without-include errors: structural term -100, blend negative.
    let code = "std::cout << 1;\n".repeat(20);
    let analyzer = offline_analyzer();
    let analysis = analyzer
        .analyze_parts(&code, Language::Cpp, false)
        .await
        .unwrap();

    assert_eq!(analysis.static_analysis.error_count, 20);
    assert_eq!(analysis.overall_score, 0);
}

#[tokio::test]
async fn rule_engine_is_idempotent_across_invocations() {
    let code = "from os import *\nx = 1\ny = x + 1\ndef f():\n    return y\n";
    let first = analyze_static(code, Language::Python);
    let second = analyze_static(code, Language::Python);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.error_count, second.error_count);
}

#[tokio::test]
async fn complete_analysis_serializes_for_callers() {
    let analyzer = offline_analyzer();
    let analysis = analyzer
        .analyze_parts("x = 1\nprint(x)", Language::Python, false)
        .await
        .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json.get("staticAnalysis").is_some());
    assert!(json.get("semanticAnalysis").is_some());
    assert!(json.get("overallScore").is_some());
    assert!(json.get("execution").is_none());
}
