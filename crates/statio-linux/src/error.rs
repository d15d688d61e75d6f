use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single OS source. Collectors log these and fall back to
/// defaults; they never cross the `SystemInfo` boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{call} failed: {source}")]
    Query {
        call: &'static str,
        source: nix::errno::Errno,
    },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
