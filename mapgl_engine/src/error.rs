//! Error types for the mapgl engine
//!
//! This module defines the error types returned by the GPU context layer
//! and its backends: driver failures, exhaustion and invalid resources.
//! Programmer errors (empty sizes, use before bind) are not errors here;
//! they panic at the call site.

use std::fmt;
use crate::gl::FramebufferStatus;

/// Result type for mapgl engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// mapgl engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (driver call failed, context lost, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (size mismatch, unknown object, unsupported format)
    InvalidResource(String),

    /// A framebuffer failed its completeness check
    IncompleteFramebuffer(FramebufferStatus),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::IncompleteFramebuffer(status) => {
                write!(f, "Incomplete framebuffer: {:?}", status)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
