//! Request bodies for reporting the lifecycle of a build run to a remote run-tracking service.
//!
//! A run is reported in two phases. [new_run_started_payload] describes the start of a run and
//! [new_run_done_payload] describes its completion. Each phase only carries the fields relevant to
//! it, so the two payloads are sent as separate requests rather than one cumulative record.

mod payload;
mod response;
mod sink;

pub use payload::{
    new_run_done_payload, new_run_started_payload, RunCompletedPayload, RunReportPayload,
    RunStartedPayload, RunStatus, RunType,
};
pub use response::RunReportResponse;
pub use sink::{report_phase, InMemoryReportSink, JsonlReportSink, ReportSink, SinkError};
