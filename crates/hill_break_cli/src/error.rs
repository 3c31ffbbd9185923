//! Error types for the command-line front-end

use hill_break_core::HillError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Hill(#[from] HillError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
