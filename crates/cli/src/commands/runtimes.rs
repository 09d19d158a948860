//! Runtimes command: query the sandbox for the languages it can run.

use anyhow::Result;
use colored::*;

use critiq_analysis::SandboxClient;

pub async fn execute() -> Result<()> {
    let sandbox = SandboxClient::from_env();
    let runtimes = sandbox.list_runtimes().await;

    println!("{}", "Available sandbox runtimes:".bold());
    for runtime in runtimes {
        println!("  {runtime}");
    }

    Ok(())
}
