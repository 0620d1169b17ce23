use clap::{Parser, ValueEnum};
use run_report::RunStatus;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct RunReporterCli {
    /// Path to the run summary to report.
    ///
    /// Falls back to the `RUN_SUMMARY_PATH` environment variable, then to `run_summary.json`.
    #[clap(short, long)]
    pub summary: Option<PathBuf>,

    /// The phase of the run to build a payload for
    #[clap(short, long, value_enum)]
    pub phase: Phase,

    /// Read the summary as JSON lines and report the last run in the file
    #[clap(long, default_value = "false")]
    pub jsonl: bool,

    /// Append the payload as a JSON line to this file instead of printing it
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print the payload when writing to stdout
    #[clap(long, default_value = "false")]
    pub pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    Started,
    Completed,
}

impl From<Phase> for RunStatus {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Started => RunStatus::Started,
            Phase::Completed => RunStatus::Completed,
        }
    }
}
