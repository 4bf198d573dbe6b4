// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling for the fallible domain operations.
///
/// Outcomes that are not failures (e.g. the tri-state result of joining a
/// group) are modeled as their own enums, not as variants here.
#[derive(Debug)]
pub enum AppError {
    /// A payload failed field validation.
    BadRequest(String),

    /// Credential verification failed.
    AuthError(String),

    /// A referenced entity does not exist.
    NotFound(String),

    /// A uniqueness rule was violated (e.g. duplicate email).
    Conflict(String),

    /// Hashing or another internal operation failed.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}
