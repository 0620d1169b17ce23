use serde::{Deserialize, Serialize};

/// The body returned by the run-tracking service when a run is reported.
///
/// Only the identifier the service assigned to the run is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReportResponse {
    #[serde(rename = "ID")]
    pub id: String,
}
