//! Composite score aggregation
//!
//! A fixed linear weighting, deliberately not configurable: structural
//! deductions feed a 0.4 term, the two semantic scores feed 0.3 terms, and
//! an execution error costs a flat 20 after blending. Callers relying on
//! score deltas (10 per error, 3 per warning, 1 per info, pre-blend) depend
//! on these exact constants.

use crate::core::{ExecutionResult, SemanticAnalysisResult, StaticAnalysisResult};

const EXECUTION_PENALTY: f64 = 20.0;

/// Combine the three partial results into one score in [0,100].
pub fn aggregate(
    static_result: &StaticAnalysisResult,
    semantic: &SemanticAnalysisResult,
    execution: Option<&ExecutionResult>,
) -> u8 {
    let structural = structural_score(static_result);

    let readability = semantic.readability_score as f64;
    let complexity = semantic.complexity_score as f64;
    let mut score = 0.4 * structural + 0.3 * readability + 0.3 * (100.0 - complexity);

    if execution.and_then(|e| e.error.as_ref()).is_some() {
        score -= EXECUTION_PENALTY;
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// 100 minus the per-severity deductions, before blending. May go negative;
/// clamping happens once, at the end of `aggregate`.
fn structural_score(static_result: &StaticAnalysisResult) -> f64 {
    let deductions: u32 = static_result
        .diagnostics
        .iter()
        .map(|d| d.severity.deduction())
        .sum();

    100.0 - deductions as f64
}
