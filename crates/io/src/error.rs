//! Error types for clearsky-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the clearsky-io crate.
///
/// This enum covers file-system failures, malformed JSON, calendar and
/// engine errors raised while building the in-memory tile, and validation
/// problems accumulated while checking a tile file.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a file-system failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps a JSON parse or serialisation failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the clearsky-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the clearsky-engine crate.
    #[error("engine error: {reason}")]
    Engine {
        /// Description of the underlying engine failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl IoError {
    /// Maps a `std::io::Error` on `path`, turning `NotFound` into
    /// [`IoError::FileNotFound`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, e: &std::io::Error) -> Self {
        let path = path.into();
        if e.kind() == std::io::ErrorKind::NotFound {
            return IoError::FileNotFound { path };
        }
        IoError::Io {
            path,
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl From<clearsky_calendar::CalendarError> for IoError {
    fn from(e: clearsky_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<clearsky_engine::EngineError> for IoError {
    fn from(e: clearsky_engine::EngineError) -> Self {
        IoError::Engine {
            reason: e.to_string(),
        }
    }
}
