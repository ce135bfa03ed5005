/// space_tracer Runner.
///
/// Production `Tracer`: runs `TraceRunner().trace_code(source)` in a child
/// Python interpreter. The source goes in on stdin, the report comes back on
/// stdout, and a failure message comes back on stderr with exit status 1.
///
/// Both directions are UTF-8: the child re-wraps its stdio in UTF-8 and is
/// started with `PYTHONIOENCODING=utf-8`, and we decode its output strictly.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use anyhow::{anyhow, bail, Context, Result};
use crate::ports::Tracer;

pub const DEFAULT_MODULE: &str = "space_tracer";

/// Environment handed to the child so its text streams are UTF-8.
pub const UTF8_ENV: &[(&str, &str)] = &[("PYTHONIOENCODING", "utf-8"), ("PYTHONUTF8", "1")];

const BOOTSTRAP_TEMPLATE: &str = r#"import io, sys
sys.stdin = io.TextIOWrapper(sys.stdin.buffer, encoding='utf-8')
sys.stdout = io.TextIOWrapper(sys.stdout.buffer, encoding='utf-8')
sys.stderr = io.TextIOWrapper(sys.stderr.buffer, encoding='utf-8')
code = sys.stdin.read()
try:
    from {module}.main import TraceRunner
    report = TraceRunner().trace_code(code)
except Exception as e:
    sys.stderr.write(str(e))
    sys.stderr.flush()
    sys.exit(1)
sys.stdout.write(report)
sys.stdout.flush()
"#;

// ═══════════════════════════════════════════════════════════════════════════
// Command Spec (testable without spawning)
// ═══════════════════════════════════════════════════════════════════════════

/// Describes the child process that would be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceCommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl TraceCommandSpec {
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Build the command that traces code with `module` under `python`.
pub fn build_command_spec(python: &Path, module: &str) -> Result<TraceCommandSpec> {
    if !is_module_path(module) {
        bail!("invalid tracer module name: {:?}", module);
    }

    Ok(TraceCommandSpec {
        program: python.to_path_buf(),
        args: vec!["-c".to_string(), BOOTSTRAP_TEMPLATE.replace("{module}", module)],
        env: UTF8_ENV
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    })
}

/// Dotted Python identifier, e.g. `space_tracer` or `vendor.space_tracer`.
fn is_module_path(module: &str) -> bool {
    !module.is_empty()
        && module.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// Tracer Adapter
// ═══════════════════════════════════════════════════════════════════════════

pub struct SpaceTracer {
    python: PathBuf,
    module: String,
}

impl SpaceTracer {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self::with_module(python, DEFAULT_MODULE)
    }

    pub fn with_module(python: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            module: module.into(),
        }
    }

    fn spawn_and_wait(&self, spec: &TraceCommandSpec, source: &str) -> Result<Output> {
        let mut child = spec
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| anyhow!("failed to start {}: {}", self.python.display(), e))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(source.as_bytes()) {
                Ok(()) => {}
                // Child exited before reading; its stderr says why.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("tracer closed stdin early");
                }
                Err(e) => return Err(e).context("failed to send source to tracer"),
            }
        }

        child
            .wait_with_output()
            .context("failed to wait for tracer process")
    }
}

impl Tracer for SpaceTracer {
    fn trace_code(&self, source: &str) -> Result<String> {
        let spec = build_command_spec(&self.python, &self.module)?;

        tracing::info!(
            python = %self.python.display(),
            module = %self.module,
            bytes = source.len(),
            "running tracer"
        );

        let output = self.spawn_and_wait(&spec, source)?;
        interpret_output(&output, &self.module)
    }
}

/// Map a finished child process to a report or an error message.
///
/// On success stdout is the report byte for byte and must be UTF-8. On
/// failure the message is stderr, else stdout, else the exit status.
pub fn interpret_output(output: &Output, module: &str) -> Result<String> {
    if output.status.success() {
        return String::from_utf8(output.stdout.clone())
            .map_err(|_| anyhow!("tracer produced non-UTF-8 output"));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::debug!(status = ?output.status.code(), "tracer exited with failure");

    let message = [stderr.trim(), stdout.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| match output.status.code() {
            Some(code) => format!("{} exited with status {}", module, code),
            None => format!("{} was terminated by a signal", module),
        });

    Err(anyhow!(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn status(code: i32) -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn test_build_command_spec() {
        let spec = build_command_spec(Path::new("python3"), DEFAULT_MODULE).unwrap();
        assert_eq!(spec.program, PathBuf::from("python3"));
        assert_eq!(spec.args[0], "-c");
        assert!(spec.args[1].contains("from space_tracer.main import TraceRunner"));
        assert!(spec.args[1].contains("TraceRunner().trace_code(code)"));
        assert!(spec.env.contains(&("PYTHONIOENCODING".to_string(), "utf-8".to_string())));
    }

    #[test]
    fn test_custom_module() {
        let spec = build_command_spec(Path::new("python"), "vendor.space_tracer").unwrap();
        assert!(spec.args[1].contains("from vendor.space_tracer.main import TraceRunner"));
    }

    #[test]
    fn test_rejects_bad_module_names() {
        for bad in ["", "os; import shutil", "1abc", "a..b", "space tracer"] {
            assert!(build_command_spec(Path::new("python"), bad).is_err(), "{:?}", bad);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_success() {
        let output = Output {
            status: status(0),
            stdout: "café\n".as_bytes().to_vec(),
            stderr: vec![],
        };
        assert_eq!(interpret_output(&output, DEFAULT_MODULE).unwrap(), "café\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_failure_prefers_stderr() {
        let output = Output {
            status: status(1),
            stdout: b"partial".to_vec(),
            stderr: b"boom\n".to_vec(),
        };
        assert_eq!(
            interpret_output(&output, DEFAULT_MODULE).unwrap_err().to_string(),
            "boom"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_failure_ignores_invalid_stdout() {
        let output = Output {
            status: status(1),
            stdout: vec![0xff],
            stderr: b"boom".to_vec(),
        };
        assert_eq!(
            interpret_output(&output, DEFAULT_MODULE).unwrap_err().to_string(),
            "boom"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_silent_failure() {
        let output = Output {
            status: status(3),
            stdout: vec![],
            stderr: vec![],
        };
        assert_eq!(
            interpret_output(&output, DEFAULT_MODULE).unwrap_err().to_string(),
            "space_tracer exited with status 3"
        );
        assert_eq!(
            interpret_output(&output, "vendor.tracer").unwrap_err().to_string(),
            "vendor.tracer exited with status 3"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_rejects_invalid_utf8() {
        let output = Output {
            status: status(0),
            stdout: vec![0xff, 0xfe],
            stderr: vec![],
        };
        assert!(interpret_output(&output, DEFAULT_MODULE).is_err());
    }

    #[test]
    fn test_missing_interpreter_is_an_error() {
        let tracer = SpaceTracer::new("/definitely/not/here/python");
        let err = tracer.trace_code("x = 1\n").unwrap_err();
        assert!(err.to_string().starts_with("failed to start /definitely/not/here/python"));
    }
}
