use std::io::Write;

use crate::domain::report::{OutputFormat, TraceOutcome};
use crate::domain::source::SourceInput;
use crate::ports::Tracer;

/// Trace one snippet and present the result.
pub struct ReportUsecase<'a> {
    pub tracer: &'a dyn Tracer,
    pub format: OutputFormat,
}

impl<'a> ReportUsecase<'a> {
    /// Call the tracer exactly once; any error becomes `TraceOutcome::Failed`.
    pub fn run(&self, source: &str) -> TraceOutcome {
        match self.tracer.trace_code(source) {
            Ok(report) => {
                tracing::debug!(bytes = report.len(), "trace succeeded");
                TraceOutcome::report(report)
            }
            Err(e) => {
                tracing::debug!(error = ?e, "trace failed");
                TraceOutcome::failed(e.to_string())
            }
        }
    }

    /// Load the input, then trace it. A load failure is reported like a
    /// tracer failure and the tracer is not called.
    pub fn run_input(&self, input: &SourceInput) -> TraceOutcome {
        match input.read() {
            Ok(source) => self.run(&source),
            Err(e) => TraceOutcome::failed(e.to_string()),
        }
    }

    /// Run and write the rendered outcome. Only write errors propagate.
    pub fn run_to<W: Write>(&self, source: &str, out: &mut W) -> std::io::Result<TraceOutcome> {
        let outcome = self.run(source);
        present(&outcome, self.format, out)?;
        Ok(outcome)
    }

    pub fn run_input_to<W: Write>(
        &self,
        input: &SourceInput,
        out: &mut W,
    ) -> std::io::Result<TraceOutcome> {
        let outcome = self.run_input(input);
        present(&outcome, self.format, out)?;
        Ok(outcome)
    }
}

fn present<W: Write>(outcome: &TraceOutcome, format: OutputFormat, out: &mut W) -> std::io::Result<()> {
    out.write_all(outcome.render(format).as_bytes())?;
    out.flush()
}
