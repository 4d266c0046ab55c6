use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Per-file failures. Both are reported and the run moves on to the next file.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The file could not be opened, read, or decoded as UTF-8.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
