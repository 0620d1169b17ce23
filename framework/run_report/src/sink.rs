use crate::payload::{RunReportPayload, RunStatus};
use run_summary_model::RunSummary;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write payload: {0}")]
    Io(#[from] std::io::Error),
}

/// A destination for built payloads.
///
/// An HTTP transport delivering payloads to the run-tracking service plugs in here.
pub trait ReportSink {
    fn send(&mut self, payload: &RunReportPayload) -> Result<(), SinkError>;
}

/// Writes each payload as a single line of JSON followed by a newline.
pub struct JsonlReportSink<W: Write> {
    writer: W,
}

impl JsonlReportSink<File> {
    /// Open a file for appending, creating it if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> JsonlReportSink<W> {
    /// Wrap a writer. Nothing is written until a payload is sent.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonlReportSink<W> {
    fn send(&mut self, payload: &RunReportPayload) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps payloads in memory, in the order they were sent.
#[derive(Debug, Default)]
pub struct InMemoryReportSink {
    payloads: Vec<RunReportPayload>,
}

impl InMemoryReportSink {
    /// The payloads sent so far
    pub fn payloads(&self) -> &[RunReportPayload] {
        &self.payloads
    }
}

impl ReportSink for InMemoryReportSink {
    fn send(&mut self, payload: &RunReportPayload) -> Result<(), SinkError> {
        self.payloads.push(payload.clone());
        Ok(())
    }
}

/// Build the payload for one phase of the run and hand it to the sink.
///
/// Returns the payload that was sent.
pub fn report_phase<S: ReportSink + ?Sized>(
    sink: &mut S,
    run_summary: &RunSummary,
    status: RunStatus,
) -> Result<RunReportPayload, SinkError> {
    let payload = RunReportPayload::for_status(run_summary, status);
    log::debug!("Reporting run {} as {:?}", run_summary.id, status);
    sink.send(&payload)?;
    Ok(payload)
}
