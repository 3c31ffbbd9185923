//! Error types for the Hill cipher engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HillError {
    #[error("No modular inverse for {value} modulo {modulus}")]
    NoInverse { value: i64, modulus: i64 },

    #[error("Key matrix is not invertible modulo 26 (determinant {determinant})")]
    NotInvertible { determinant: u32 },

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, HillError>;
