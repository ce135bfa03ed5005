// Ports: the seams between the runner and the outside world.

/// The external tracing capability.
///
/// One call per snippet. Returns the textual report, or an error whose
/// `Display` message is shown to the user verbatim.
pub trait Tracer {
    fn trace_code(&self, source: &str) -> anyhow::Result<String>;
}

