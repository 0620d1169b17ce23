use anyhow::Context;
use run_report::{report_phase, JsonlReportSink, RunReportPayload, RunStatus};
use run_summary_model::{load_run_summaries, load_run_summary, RunSummary};
use std::path::{Path, PathBuf};

pub mod cli;

/// Environment variable name to set a custom run summary file path
pub const RUN_SUMMARY_PATH_ENV: &str = "RUN_SUMMARY_PATH";
/// Default path for the run summary file
pub const DEFAULT_RUN_SUMMARY_PATH: &str = "run_summary.json";

/// Pick the summary path from the command line, then the environment, then the default.
pub fn resolve_summary_path(from_cli: Option<PathBuf>) -> PathBuf {
    from_cli
        .or_else(|| std::env::var(RUN_SUMMARY_PATH_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RUN_SUMMARY_PATH))
}

/// Load the run summary to report.
///
/// With `jsonl` set the file is read as JSON lines and the last run in it is returned.
pub fn load_summary(path: &Path, jsonl: bool) -> anyhow::Result<RunSummary> {
    if jsonl {
        load_run_summaries(path.to_path_buf())?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No run summaries in {}", path.display()))
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open run summary {}", path.display()))?;
        load_run_summary(file)
    }
}

/// Render a payload as JSON, on one line unless `pretty` is set
pub fn render_payload(payload: &RunReportPayload, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    Ok(rendered)
}

/// Build the payload for `status` and either append it to `output` or return it rendered for
/// printing.
pub fn run(
    summary: &RunSummary,
    status: RunStatus,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<Option<String>> {
    match output {
        Some(path) => {
            let mut sink = JsonlReportSink::open(path)
                .with_context(|| format!("Failed to open report output {}", path.display()))?;
            report_phase(&mut sink, summary, status).context("Failed to write report")?;
            log::info!("Appended {:?} report to {}", status, path.display());
            Ok(None)
        }
        None => {
            let payload = RunReportPayload::for_status(summary, status);
            Ok(Some(render_payload(&payload, pretty)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use run_summary_model::{append_run_summary, store_run_summary};

    fn finished_summary(id: &str) -> RunSummary {
        let mut summary = RunSummary::new(
            id.to_string(),
            "1.10.0".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        summary.finish(Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap(), 0);
        summary
    }

    #[test]
    fn cli_path_wins() {
        assert_eq!(
            PathBuf::from("given.json"),
            resolve_summary_path(Some(PathBuf::from("given.json")))
        );
    }

    // Both branches live in one test so nothing else touches the variable while it is set.
    #[test]
    fn env_path_then_default() {
        std::env::set_var(RUN_SUMMARY_PATH_ENV, "from_env.jsonl");
        let from_env = resolve_summary_path(None);
        let cli_over_env = resolve_summary_path(Some(PathBuf::from("given.json")));
        std::env::remove_var(RUN_SUMMARY_PATH_ENV);

        assert_eq!(PathBuf::from("from_env.jsonl"), from_env);
        assert_eq!(PathBuf::from("given.json"), cli_over_env);
        assert_eq!(
            PathBuf::from(DEFAULT_RUN_SUMMARY_PATH),
            resolve_summary_path(None)
        );
    }

    #[test]
    fn load_single_summary() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run_summary.json");
        let summary = finished_summary("run-1");
        store_run_summary(&summary, &mut std::fs::File::create(&path)?)?;

        assert_eq!(summary, load_summary(&path, false)?);
        Ok(())
    }

    #[test]
    fn load_last_of_jsonl() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run_summary.jsonl");
        append_run_summary(&finished_summary("run-1"), path.clone())?;
        append_run_summary(&finished_summary("run-2"), path.clone())?;

        assert_eq!("run-2", load_summary(&path, true)?.id);
        Ok(())
    }

    #[test]
    fn load_empty_jsonl_fails() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run_summary.jsonl");
        std::fs::write(&path, "")?;

        assert!(load_summary(&path, true).is_err());
        Ok(())
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(load_summary(Path::new("/does/not/exist.json"), false).is_err());
    }

    #[test]
    fn run_to_stdout() -> anyhow::Result<()> {
        let rendered = run(&finished_summary("run-1"), RunStatus::Started, None, false)?;

        assert_eq!(
            Some(r#"{"status":"started","startTime":1704067200000,"type":"TURBO"}"#.to_string()),
            rendered
        );
        Ok(())
    }

    #[test]
    fn run_to_output_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("reports.jsonl");
        let summary = finished_summary("run-1");

        assert_eq!(None, run(&summary, RunStatus::Started, Some(&output), false)?);
        assert_eq!(None, run(&summary, RunStatus::Completed, Some(&output), false)?);

        let content = std::fs::read_to_string(&output)?;
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(
            vec![
                r#"{"status":"started","startTime":1704067200000,"type":"TURBO"}"#,
                r#"{"status":"completed","endTime":1704067260000}"#,
            ],
            lines
        );
        Ok(())
    }

    #[test]
    fn pretty_output_is_multiline() -> anyhow::Result<()> {
        let payload =
            RunReportPayload::for_status(&finished_summary("run-1"), RunStatus::Completed);

        assert!(render_payload(&payload, true)?.contains('\n'));
        assert!(!render_payload(&payload, false)?.contains('\n'));
        Ok(())
    }
}
