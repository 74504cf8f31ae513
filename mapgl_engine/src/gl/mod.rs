/// GL module - driver seam, cached state and owned GPU objects

// Module declarations
pub mod types;
pub mod backend;
pub mod state;
pub mod config;
pub mod context;
pub mod texture;
pub mod framebuffer;
pub mod renderbuffer;
pub(crate) mod object;

// Re-export public types
pub use types::*;
pub use backend::*;
pub use state::*;
pub use config::*;
pub use context::*;
pub use texture::*;
pub use framebuffer::*;
pub use renderbuffer::*;

// Mock backend for tests (no driver required)
#[cfg(test)]
pub mod mock_backend;
