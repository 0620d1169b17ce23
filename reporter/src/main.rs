use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use run_reporter::cli::RunReporterCli;
use run_reporter::{load_summary, resolve_summary_path, run};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = RunReporterCli::parse();

    let summary_path = resolve_summary_path(cli.summary.clone());
    debug!("Loading summary from {}", summary_path.display());
    let summary = load_summary(&summary_path, cli.jsonl)
        .with_context(|| format!("Failed to load run summary {}", summary_path.display()))?;

    let status = cli.phase.into();
    info!("Building {:?} report for run {}", status, summary.id);

    if let Some(rendered) = run(&summary, status, cli.output.as_deref(), cli.pretty)? {
        println!("{rendered}");
    }

    Ok(())
}
