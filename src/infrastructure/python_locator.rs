/// Python Interpreter Locator
///
/// Resolves which interpreter runs the tracer:
/// - explicit override (CLI or config), used as-is
/// - `PYTHON_EXECUTABLE`
/// - active environment homes: `CONDA_PREFIX`, `VIRTUAL_ENV`, `PYTHON_HOME`
/// - `python3` / `python` on `PATH`
///
/// The first usable candidate wins; `python` is the last resort.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const FALLBACK_PYTHON: &str = "python";

const HOME_VARS: &[&str] = &["CONDA_PREFIX", "VIRTUAL_ENV", "PYTHON_HOME"];

/// Reads environment variables. Boxed so tests can feed a fixed map.
pub type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<OsString> + 'a>;

pub struct PythonLocator<'a> {
    env: EnvLookup<'a>,
}

impl PythonLocator<'static> {
    pub fn from_process_env() -> Self {
        PythonLocator {
            env: Box::new(|key| std::env::var_os(key)),
        }
    }
}

impl<'a> PythonLocator<'a> {
    pub fn with_env(env: impl Fn(&str) -> Option<OsString> + 'a) -> Self {
        Self { env: Box::new(env) }
    }

    /// Pick the interpreter. An override is trusted without probing.
    pub fn resolve(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            tracing::debug!(python = %path.display(), "using explicit interpreter");
            return path.to_path_buf();
        }

        let mut seen = HashSet::new();
        for candidate in self.candidates() {
            let key = candidate.to_string_lossy().to_lowercase();
            if !seen.insert(key) {
                continue;
            }
            if let Some(found) = self.locate(&candidate) {
                tracing::debug!(python = %found.display(), "resolved interpreter");
                return found;
            }
            tracing::trace!(python = %candidate.display(), "candidate not usable");
        }

        tracing::debug!("no usable python found, falling back to `{}`", FALLBACK_PYTHON);
        PathBuf::from(FALLBACK_PYTHON)
    }

    /// Candidates in priority order, duplicates included.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();

        if let Some(explicit) = self.var("PYTHON_EXECUTABLE") {
            out.push(PathBuf::from(explicit));
        }
        for var in HOME_VARS {
            if let Some(home) = self.var(var) {
                out.extend(interpreters_in_home(Path::new(&home)));
            }
        }
        out.push(PathBuf::from("python3"));
        out.push(PathBuf::from("python"));
        out
    }

    /// Absolute paths must exist; bare names must be found on `PATH`.
    pub fn locate(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_absolute() || candidate.components().count() > 1 {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }
        self.find_on_path(candidate)
    }

    pub fn find_on_path(&self, name: &Path) -> Option<PathBuf> {
        let path_var = (self.env)("PATH")?;
        std::env::split_paths(&path_var)
            .flat_map(|dir| executable_names(name).into_iter().map(move |n| dir.join(n)))
            .find(|p| p.is_file())
    }

    fn var(&self, key: &str) -> Option<OsString> {
        (self.env)(key).filter(|v| !v.is_empty())
    }
}

fn interpreters_in_home(home: &Path) -> Vec<PathBuf> {
    let (scripts, names): (&str, &[&str]) = if cfg!(windows) {
        ("Scripts", &["python.exe", "python3.exe", "pythonw.exe"])
    } else {
        ("bin", &["python3", "python"])
    };

    let mut out = Vec::new();
    for name in names {
        out.push(home.join(name));
        out.push(home.join(scripts).join(name));
    }
    out
}

fn executable_names(name: &Path) -> Vec<PathBuf> {
    if cfg!(windows) && name.extension().is_none() {
        vec![name.with_extension("exe"), name.to_path_buf()]
    } else {
        vec![name.to_path_buf()]
    }
}
