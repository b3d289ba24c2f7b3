//! This module resolves machine specifications and tapes from their two
//! possible sources: an inline command-line string or a file. When both are
//! given, the file takes precedence.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors reading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    FileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves an input from an optional inline value and an optional file
/// path. Returns `None` when neither source is given.
///
/// File content is trimmed of trailing whitespace so that a conventional
/// final newline does not end up inside a specification or tape.
pub fn resolve_input(
    inline: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<String>, LoadError> {
    if let Some(path) = file {
        let content = fs::read_to_string(path).map_err(|e| LoadError::FileError {
            path: path.display().to_string(),
            source: e,
        })?;
        return Ok(Some(content.trim_end().to_string()));
    }

    Ok(inline.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_inline_only() {
        let result = resolve_input(Some("10110"), None).unwrap();
        assert_eq!(result, Some("10110".to_string()));
    }

    #[test]
    fn test_neither_source() {
        let result = resolve_input(None, None).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_file_takes_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("machine.penrose");

        let mut file = File::create(&path).unwrap();
        file.write_all(b"110110\n").unwrap();

        let result = resolve_input(Some("inline"), Some(path.as_path())).unwrap();
        assert_eq!(result, Some("110110".to_string()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.penrose");

        let result = resolve_input(None, Some(path.as_path()));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("absent.penrose"));
    }
}
