use crate::core::{ExecutionResult, Language};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://emkc.org/api/v2/piston";

/// Hard ceiling on one execution round trip.
const EXECUTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtimes reported when the listing endpoint is unreachable.
const FALLBACK_RUNTIMES: [&str; 5] = ["python", "javascript", "c", "cpp", "java"];

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<FileSpec<'a>>,
}

#[derive(Debug, Serialize)]
struct FileSpec<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecuteReply {
    run: Option<RunSection>,
}

#[derive(Debug, Deserialize)]
struct RunSection {
    output: Option<String>,
    stderr: Option<String>,
    code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RuntimeEntry {
    language: String,
}

/// Client for the execution sandbox. `execute` never fails: transport
/// errors, timeouts, and malformed replies all normalize to an
/// `ExecutionResult` carrying an error message.
pub struct SandboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `PISTON_BASE_URL`, falling back to the public instance.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PISTON_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The sandbox's name for one of our languages. Only python differs.
    fn runtime_id(language: Language) -> &'static str {
        match language {
            Language::Python => "python3",
            other => other.as_str(),
        }
    }

    pub async fn execute(&self, code: &str, language: Language) -> ExecutionResult {
        let request = ExecuteRequest {
            language: Self::runtime_id(language),
            version: "*",
            files: vec![FileSpec { content: code }],
        };

        debug!(language = %language, runtime = request.language, "submitting code for execution");

        let response = self
            .http
            .post(format!("{}/execute", self.base_url))
            .timeout(EXECUTE_TIMEOUT)
            .json(&request)
            .send()
            .await;

        let reply: ExecuteReply = match response {
            Ok(response) => match response.json().await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "sandbox returned malformed reply");
                    return ExecutionResult::failed(format!("Execution error: {e}"));
                }
            },
            Err(e) => {
                warn!(error = %e, "sandbox request failed");
                return ExecutionResult::failed(format!("Execution error: {e}"));
            }
        };

        Self::normalize(reply)
    }

    fn normalize(reply: ExecuteReply) -> ExecutionResult {
        match reply.run {
            Some(run) => ExecutionResult {
                output: Some(run.output.unwrap_or_default()),
                error: run.stderr.filter(|s| !s.is_empty()),
                // The sandbox does not report a precise duration; zero marks
                // a clean exit, absent marks everything else.
                execution_time_ms: (run.code == Some(0)).then_some(0),
            },
            None => ExecutionResult::failed("Execution failed: No output received"),
        }
    }

    /// Informational only, never on the analysis critical path.
    pub async fn list_runtimes(&self) -> Vec<String> {
        let fallback = || FALLBACK_RUNTIMES.iter().map(|s| s.to_string()).collect();

        let response = self
            .http
            .get(format!("{}/runtimes", self.base_url))
            .timeout(EXECUTE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(response) => match response.json::<Vec<RuntimeEntry>>().await {
                Ok(runtimes) => runtimes.into_iter().map(|r| r.language).collect(),
                Err(e) => {
                    warn!(error = %e, "failed to decode runtime listing");
                    fallback()
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to fetch runtime listing");
                fallback()
            }
        }
    }
}

impl Default for SandboxClient {
    fn default() -> Self {
        Self::from_env()
    }
}
