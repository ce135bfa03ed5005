// Where the traced code comes from.

use std::path::PathBuf;
use anyhow::{Context, Result};

/// Loop with a `continue` branch; prints 8.
pub const SAMPLE_SOURCE: &str = "a = 4
for i in range(a):
    if i%2==0:
        continue
    a += i

print(a)
";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceInput {
    /// The built-in sample snippet.
    #[default]
    Embedded,
    File(PathBuf),
}

impl SourceInput {
    pub fn from_file(path: Option<PathBuf>) -> Self {
        path.map(SourceInput::File).unwrap_or_default()
    }

    /// Read the code as UTF-8 text.
    pub fn read(&self) -> Result<String> {
        match self {
            SourceInput::Embedded => Ok(SAMPLE_SOURCE.to_string()),
            SourceInput::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read source file {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        assert!(SAMPLE_SOURCE.starts_with("a = 4\n"));
        assert!(SAMPLE_SOURCE.ends_with("print(a)\n"));
        assert_eq!(SAMPLE_SOURCE.lines().count(), 7);
    }

    #[test]
    fn test_embedded_is_default() {
        assert_eq!(SourceInput::from_file(None), SourceInput::Embedded);
        assert_eq!(SourceInput::Embedded.read().unwrap(), SAMPLE_SOURCE);
    }

    #[test]
    fn test_read_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.py");
        std::fs::write(&path, "print('héllo')\n").unwrap();

        let input = SourceInput::from_file(Some(path));
        assert_eq!(input.read().unwrap(), "print('héllo')\n");
    }

    #[test]
    fn test_missing_file_message() {
        let input = SourceInput::File(PathBuf::from("/no/such/demo.py"));
        let err = input.read().unwrap_err();
        assert_eq!(err.to_string(), "Cannot read source file /no/such/demo.py");
    }
}
