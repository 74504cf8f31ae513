/*!
# mapgl Engine

Core types for off-screen rendering in the mapgl map renderer.

The driver is reached through a trait (`Backend`), so the same code runs on
any implementation: the software `mapgl_engine_headless` backend, or a test
double.

## Architecture

- **Backend**: raw driver seam, one method per driver call
- **Context**: object factory with cached binding state and deferred deletion
- **Texture / Framebuffer / Renderbuffer**: uniquely owned GPU objects
- **OffscreenTexture**: lazily allocated render target with read-back
- **Image**: premultiplied / unassociated / alpha pixel containers
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod gl;
pub mod util;

// Main mapgl namespace module
pub mod mapgl {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine-wide services
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // GL sub-module with the context, objects and driver seam
    pub mod gl {
        pub use crate::gl::*;
    }

    // Utility sub-module (images, off-screen targets)
    pub mod util {
        pub use crate::util::*;
    }
}

// Re-export math library at crate root
pub use glam;
