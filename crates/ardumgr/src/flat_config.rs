//! flat `key=value` configuration files
//!
//! The definition files of an installation (`platform.txt`, `boards.txt`, `programmers.txt`) are
//! line oriented:
//! ```text
//! # comments start with '#' (or ';')
//! uno.name=Arduino Uno
//! uno.upload.speed=115200
//! ```
//! - surrounding whitespace of lines, keys and values is ignored
//! - a line is split at its first `=`, so values may contain `=`
//! - a key that repeats replaces the earlier value but keeps its position
//!
//! Keys can be namespaced on load: parsing the above with prefix `boards` yields
//! `boards.uno.name` and `boards.uno.upload.speed`.
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Ordered mapping of one parsed file
pub type FlatConfig = IndexMap<String, String>;

/// Parse a block of `key=value` lines
///
/// An empty `prefix` is the same as no prefix.
pub fn parse(text: &str, prefix: Option<&str>) -> Result<FlatConfig, ParseError> {
    let prefix = prefix.filter(|prefix| !prefix.is_empty());
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut entries = FlatConfig::new();
    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let malformed = || ParseError {
            line: index + 1,
            text: raw_line.to_string(),
        };

        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }

        let key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_string(),
        };

        if let Some(previous) = entries.insert(key, value.trim().to_string()) {
            tracing::debug!(line = index + 1, %previous, "key redefined");
        }
    }

    Ok(entries)
}

/// Read a file that may not exist
///
/// A missing file is `Ok(None)`. The file is closed before this returns.
pub fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(path=%path.display(), "read file");
            Ok(Some(text))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path=%path.display(), "file not present");
            Ok(None)
        }
        Err(source) => Err(LoadError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: expected `key=value`, found {text:?}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse {origin}")]
    Parse {
        origin: String,
        #[source]
        source: ParseError,
    },
}
