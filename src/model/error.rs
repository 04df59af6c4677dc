//! Error types for revfeed.
//!
//! Errors are `thiserror` enums composed via `From` so the shell can use `?`
//! end to end.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`InputError`] - Review document could not be located or read
//!   - [`crate::config::ConfigError`] - Config file unreadable or malformed
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup failed
//!   - `std::io::Error` - Terminal failures
//! - [`FetchError`] - Page fetch failures surfaced to the pagination store
//!
//! # Recovery Strategy
//!
//! Fetch errors are **never fatal**. The pagination store resets its gate so
//! the next trigger can retry, and no row data is touched. Only startup
//! failures (config, logging, input, terminal) terminate the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for the `revfeed` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The review document could not be opened.
    #[error("Failed to open reviews: {0}")]
    Input(#[from] InputError),

    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when locating a file-backed review source.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified reviews file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use revfeed::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Generic I/O failure while probing the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page fetch failed.
///
/// Both variants are handled identically by
/// [`PaginationStore`](crate::pagination::PaginationStore): the fetch gate is
/// reopened and a state-changed notification is emitted. The distinction
/// exists for logging only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: unreachable host, unreadable file, timeout.
    #[error("Fetch failed: {reason}")]
    Transport {
        /// Human-readable cause.
        reason: String,
    },

    /// The payload arrived but could not be decoded.
    #[error("Malformed review payload: {reason}")]
    Decode {
        /// Decoder error details.
        reason: String,
    },
}

impl FetchError {
    /// Build a transport error from anything printable.
    pub fn transport(reason: impl ToString) -> Self {
        Self::Transport {
            reason: reason.to_string(),
        }
    }

    /// Build a decode error from anything printable.
    pub fn decode(reason: impl ToString) -> Self {
        Self::Decode {
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::transport(err)
    }
}
