/// Configuration
///
/// Settings come from two layers: an optional TOML file and command-line
/// flags. Flags win. Every key is optional; with neither layer the embedded
/// sample is traced with the default interpreter lookup and text output.
///
/// ```toml
/// python = "/usr/bin/python3"
/// module = "space_tracer"
/// format = "json"
/// ```

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use crate::domain::report::OutputFormat;
use super::space_tracer::DEFAULT_MODULE;

/// Contents of a config file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub python: Option<PathBuf>,
    pub module: Option<String>,
    pub format: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub python: Option<PathBuf>,
    pub module: Option<String>,
    pub format: Option<OutputFormat>,
    pub file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    /// Explicit interpreter; `None` means discover one.
    pub python: Option<PathBuf>,
    pub module: String,
    pub format: OutputFormat,
    /// Source file to trace instead of the embedded sample.
    pub file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Result<Self> {
        let format = match (cli.format, file.format) {
            (Some(f), _) => f,
            (None, Some(name)) => match OutputFormat::from_str(&name) {
                Some(f) => f,
                None => bail!("Unknown output format in config: {}", name),
            },
            (None, None) => OutputFormat::default(),
        };

        Ok(Settings {
            python: cli.python.or(file.python),
            module: cli
                .module
                .or(file.module)
                .unwrap_or_else(|| DEFAULT_MODULE.to_string()),
            format,
            file: cli.file,
        })
    }
}
