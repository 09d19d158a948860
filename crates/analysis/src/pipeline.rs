//! Pipeline orchestration
//!
//! Three stages: the rule engine runs first (its findings feed the critique
//! prompt), then the critique call and the optional execution call run
//! concurrently, then the aggregator folds everything into one score. Both
//! concurrent branches catch their own failures and return degraded results,
//! so the join itself cannot fail; the only surfaced error is request
//! validation.

use crate::core::{AnalysisRequest, CompleteAnalysis, Language};
use crate::exec::SandboxClient;
use crate::rules;
use crate::score;
use crate::semantic::CritiqueClient;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("code must not be empty")]
    EmptyCode,
}

pub struct Analyzer {
    critique: CritiqueClient,
    sandbox: SandboxClient,
}

impl Analyzer {
    pub fn new(critique: CritiqueClient, sandbox: SandboxClient) -> Self {
        Self { critique, sandbox }
    }

    /// Both collaborators configured from the environment.
    pub fn from_env() -> Self {
        Self::new(CritiqueClient::from_env(), SandboxClient::from_env())
    }

    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<CompleteAnalysis, AnalysisError> {
        self.analyze_parts(&request.code, request.language, request.execute)
            .await
    }

    /// Run the full pipeline. Returns a populated `CompleteAnalysis` even
    /// when every remote dependency is down; the score is simply built from
    /// degraded component results.
    pub async fn analyze_parts(
        &self,
        code: &str,
        language: Language,
        execute: bool,
    ) -> Result<CompleteAnalysis, AnalysisError> {
        if code.trim().is_empty() {
            return Err(AnalysisError::EmptyCode);
        }

        info!(language = %language, execute, "starting analysis");

        let static_analysis = rules::analyze_static(code, language);
        debug!(
            diagnostics = static_analysis.diagnostics.len(),
            errors = static_analysis.error_count,
            warnings = static_analysis.warnings,
            "static analysis complete"
        );

        // Launched together, awaited jointly. Each branch honors a no-throw
        // contract, so a hiccup in one never discards the other's result.
        let (semantic_analysis, execution) = tokio::join!(
            self.critique.critique(code, language, &static_analysis),
            async {
                if execute {
                    Some(self.sandbox.execute(code, language).await)
                } else {
                    None
                }
            }
        );

        let overall_score = score::aggregate(&static_analysis, &semantic_analysis, execution.as_ref());
        info!(overall_score, "analysis complete");

        Ok(CompleteAnalysis {
            static_analysis,
            semantic_analysis,
            execution,
            overall_score,
        })
    }
}
