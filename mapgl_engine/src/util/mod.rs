//! Utilities built on the gl layer
//!
//! Provides the read-back image containers and the lazily allocated
//! off-screen render target.

pub mod image;
mod offscreen_texture;

pub use image::{
    premultiply, unpremultiply, AlphaImage, Image, ImageKind, PremultipliedImage,
    UnassociatedImage,
};
pub use offscreen_texture::OffscreenTexture;
