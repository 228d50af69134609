#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the `stt` binary.

use derive_more::{Display, From};
use stt_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Failure inside the generator library.
    #[display("{}", _0)]
    App(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// `General(String)` carries no source, so `Error` is implemented by hand.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
