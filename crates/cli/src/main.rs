use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
use commands::{analyze::AnalyzeArgs, runtimes};

#[derive(Parser)]
#[command(name = "critiq")]
#[command(about = "Composite code analysis: lint rules, AI critique, sandboxed execution")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source file and print the verdict
    Analyze(AnalyzeArgs),

    /// List runtimes available in the execution sandbox
    Runtimes,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args).await,
        Commands::Runtimes => runtimes::execute().await,
    }
}
