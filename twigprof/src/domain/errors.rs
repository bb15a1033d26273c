//! Structured error types for twigprof
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile entry node {name:?} is not a root span")]
    NotRoot { name: String },

    #[error("Root span {name:?} found below the profile root")]
    NestedRoot { name: String },

    #[error("Span {name:?} has invalid duration {value}")]
    InvalidDuration { name: String, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
