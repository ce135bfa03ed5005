//! Trace Report Domain Module
//!
//! The outcome of a single tracer call and how it is rendered to stdout.

use serde::Serialize;

pub const REPORT_START: &str = "--- REPORT START ---";
pub const REPORT_END: &str = "--- REPORT END ---";

/// Output format selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse format from string (CLI/config input).
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of tracing one snippet: either the report or the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TraceOutcome {
    #[serde(rename = "success")]
    Report { report: String },
    #[serde(rename = "error")]
    Failed { message: String },
}

impl TraceOutcome {
    pub fn report(report: impl Into<String>) -> Self {
        TraceOutcome::Report { report: report.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        TraceOutcome::Failed { message: message.into() }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, TraceOutcome::Report { .. })
    }

    /// Render the outcome, newline-terminated.
    ///
    /// Text: markers around the report on success, the bare message on failure.
    /// Json: one line with `status` plus `report` or `message`.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => match self {
                TraceOutcome::Report { report } => {
                    format!("{}\n{}\n{}\n", REPORT_START, report, REPORT_END)
                }
                TraceOutcome::Failed { message } => format!("{}\n", message),
            },
            OutputFormat::Json => {
                // A tagged enum of two String fields cannot fail to serialize.
                let line = serde_json::to_string(self).unwrap_or_default();
                format!("{}\n", line)
            }
        }
    }
}
