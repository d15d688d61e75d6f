use std::fs;
use std::path::Path;

use crate::error::{SourceError, SourceResult};

/// Read a whole text source. Invalid UTF-8 is replaced per byte sequence so
/// one odd line cannot hide the rest of the file.
pub fn read_source(path: &Path) -> SourceResult<String> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// First line of a file with surrounding whitespace removed.
/// Missing or unreadable files read as an empty string.
pub fn read_first_line(path: &Path) -> String {
    match read_source(path) {
        Ok(content) => content.lines().next().unwrap_or("").trim().to_string(),
        Err(e) => {
            tracing::debug!("{}", e);
            String::new()
        }
    }
}

/// Split `line` on the first `delimiter`, trimming both halves.
pub fn split_key_value(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(delimiter)?;
    Some((key.trim(), value.trim()))
}

/// Strip one layer of double quotes when present on both ends.
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
