//! Analyze command: run the full pipeline on one file and render the verdict.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use std::path::PathBuf;

use critiq_analysis::{AnalysisRequest, Analyzer, CompleteAnalysis, Language, Severity};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Language of the input; inferred from the file extension when omitted
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Also run the snippet in the execution sandbox
    #[arg(short, long)]
    pub execute: bool,

    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let code = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let language = match args.language {
        Some(language) => language,
        None => infer_language(&args.input)?,
    };

    let request = AnalysisRequest::new(code, language, args.execute)
        .context("input file is empty")?;

    let analyzer = Analyzer::from_env();
    let analysis = analyzer.analyze(&request).await?;

    let report = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&analysis)?,
        OutputFormat::Text => render_text(&analysis, language),
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{report}"),
    }

    Ok(())
}

fn infer_language(path: &std::path::Path) -> Result<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .with_context(|| {
            format!(
                "cannot infer language from {}; pass --language",
                path.display()
            )
        })
}

fn render_text(analysis: &CompleteAnalysis, language: Language) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({})\n",
        "Analysis Report".bold(),
        language
    ));
    out.push_str(&format!(
        "Overall score: {}\n\n",
        score_colored(analysis.overall_score)
    ));

    let static_analysis = &analysis.static_analysis;
    if static_analysis.diagnostics.is_empty() {
        out.push_str(&format!("{}\n", "No static findings.".green()));
    } else {
        out.push_str(&format!(
            "Static findings ({} errors, {} warnings):\n",
            static_analysis.error_count, static_analysis.warnings
        ));
        for diag in &static_analysis.diagnostics {
            let label = match diag.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow(),
                Severity::Info => "info".blue(),
            };
            let rule = diag.rule.map(|r| format!(" [{r}]")).unwrap_or_default();
            out.push_str(&format!(
                "  line {:>4}  {label}  {}{rule}\n",
                diag.line, diag.message
            ));
        }
    }

    let semantic = &analysis.semantic_analysis;
    out.push_str(&format!(
        "\n{}\n{}\n",
        "AI critique:".bold(),
        semantic.feedback
    ));
    out.push_str(&format!(
        "  readability {}  complexity {}\n",
        semantic.readability_score, semantic.complexity_score
    ));
    for hint in &semantic.optimization_hints {
        out.push_str(&format!("  - {hint}\n"));
    }

    if let Some(execution) = &analysis.execution {
        out.push_str(&format!("\n{}\n", "Execution:".bold()));
        if let Some(output) = &execution.output {
            if !output.is_empty() {
                out.push_str(&format!("{output}\n"));
            }
        }
        if let Some(error) = &execution.error {
            out.push_str(&format!("{}\n", error.red()));
        }
    }

    out
}

fn score_colored(score: u8) -> ColoredString {
    let text = format!("{score}/100");
    match score {
        80..=100 => text.green().bold(),
        50..=79 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}
