use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

/// Summary of a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The unique run id
    ///
    /// Chosen by the orchestrator. Unique for each run.
    pub id: String,
    /// The version of the build tool that produced this run
    pub version: String,
    /// Timing and outcome of the run
    pub execution_summary: ExecutionSummary,
}

/// The timing and outcome portion of a [RunSummary]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionSummary {
    /// The instant the run started
    pub started_at: DateTime<Utc>,
    /// The instant the run ended
    ///
    /// Holds the Unix epoch until the run has been finished with [RunSummary::finish].
    pub ended_at: DateTime<Utc>,
    /// The exit code of the whole run
    pub exit_code: i32,
}

impl ExecutionSummary {
    /// Create an execution summary for a run that has just started
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            ended_at: DateTime::<Utc>::default(),
            exit_code: 0,
        }
    }
}

impl RunSummary {
    /// Create a new run summary
    pub fn new(id: String, version: String, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            version,
            execution_summary: ExecutionSummary::new(started_at),
        }
    }

    /// Record the end of the run
    pub fn finish(&mut self, ended_at: DateTime<Utc>, exit_code: i32) {
        self.execution_summary.ended_at = ended_at;
        self.execution_summary.exit_code = exit_code;
    }
}

/// Append the run summary to a file
///
/// The summary will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_run_summary(run_summary: &RunSummary, path: PathBuf) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_run_summary(run_summary, &mut file)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serialize the run summary to a writer
pub fn store_run_summary<W: Write>(
    run_summary: &RunSummary,
    writer: &mut W,
) -> anyhow::Result<()> {
    serde_json::to_writer(writer, run_summary)?;
    Ok(())
}

/// Load a run summary from a reader
pub fn load_run_summary<R: Read>(reader: R) -> anyhow::Result<RunSummary> {
    let reader = std::io::BufReader::new(reader);
    let run_summary: RunSummary = serde_json::from_reader(reader)?;
    Ok(run_summary)
}

/// Load run summaries from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_run_summary]. Blank lines are skipped.
pub fn load_run_summaries(path: PathBuf) -> anyhow::Result<Vec<RunSummary>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut runs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let run: RunSummary = serde_json::from_str(&line)?;
        runs.push(run);
    }
    Ok(runs)
}
