//! JSON rendering of analysis reports.

use crate::ports::{AnalysisReport, ReportExporter, StoreError};

/// Renders reports as JSON documents.
#[derive(Debug, Clone, Copy)]
pub struct JsonReportExporter {
    pretty: bool,
}

impl JsonReportExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonReportExporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportExporter for JsonReportExporter {
    fn render(&self, report: &AnalysisReport) -> Result<String, StoreError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| StoreError::SerializationFailed(e.to_string()))
    }
}
