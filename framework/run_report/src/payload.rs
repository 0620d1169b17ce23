use run_summary_model::RunSummary;
use serde::{Deserialize, Serialize};

/// Identifies the tool producing the report. Only sent with the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunType {
    #[serde(rename = "TURBO")]
    Turbo,
}

/// The lifecycle phase a payload reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Started,
    Completed,
}

/// One reporting event, serialized as the flat record the run-tracking service expects.
///
/// The `status` field on the wire selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunReportPayload {
    Started(RunStartedPayload),
    Completed(RunCompletedPayload),
}

impl RunReportPayload {
    /// Build the payload for the given phase of the run
    pub fn for_status(run_summary: &RunSummary, status: RunStatus) -> Self {
        match status {
            RunStatus::Started => new_run_started_payload(run_summary),
            RunStatus::Completed => new_run_done_payload(run_summary),
        }
    }

    /// The lifecycle phase this payload reports
    pub fn status(&self) -> RunStatus {
        match self {
            RunReportPayload::Started(_) => RunStatus::Started,
            RunReportPayload::Completed(_) => RunStatus::Completed,
        }
    }

    /// The identifier assigned by the service. Never set by a payload built on this side.
    pub fn id(&self) -> Option<&str> {
        match self {
            RunReportPayload::Started(p) => p.id.as_deref(),
            RunReportPayload::Completed(p) => p.id.as_deref(),
        }
    }
}

/// Zero values are left off the wire and read back as zero.
fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Reports the start of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStartedPayload {
    #[serde(rename = "vercelId", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// Unix timestamp in milliseconds
    #[serde(default, skip_serializing_if = "is_zero")]
    start_time: i64,
    #[serde(rename = "type")]
    run_type: RunType,
}

impl RunStartedPayload {
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    pub fn run_type(&self) -> RunType {
        self.run_type
    }
}

/// Reports the completion of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCompletedPayload {
    #[serde(rename = "vercelId", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// Unix timestamp in milliseconds
    #[serde(default, skip_serializing_if = "is_zero")]
    end_time: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    exit_code: i32,
}

impl RunCompletedPayload {
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// Build the payload reporting that a run has started.
///
/// The caller must have set [run_summary_model::ExecutionSummary::started_at]. An unset start
/// instant is not rejected. It is the Unix epoch, so `startTime` is left off the wire.
pub fn new_run_started_payload(run_summary: &RunSummary) -> RunReportPayload {
    RunReportPayload::Started(RunStartedPayload {
        id: None,
        start_time: run_summary.execution_summary.started_at.timestamp_millis(),
        run_type: RunType::Turbo,
    })
}

/// Build the payload reporting that a run has completed.
///
/// Only the end time and exit code are sent, and a zero exit code is left off the wire. The start
/// time and the tool identifier were already sent with the start of the run.
pub fn new_run_done_payload(run_summary: &RunSummary) -> RunReportPayload {
    RunReportPayload::Completed(RunCompletedPayload {
        id: None,
        end_time: run_summary.execution_summary.ended_at.timestamp_millis(),
        exit_code: run_summary.execution_summary.exit_code,
    })
}
