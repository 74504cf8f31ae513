/// Plain value types shared by the context, its objects and the backends

use bitflags::bitflags;
use slotmap::new_key_type;

// ===== OBJECT IDS =====

new_key_type! {
    /// Driver-side texture object
    pub struct TextureId;
    /// Driver-side framebuffer object
    pub struct FramebufferId;
    /// Driver-side renderbuffer object
    pub struct RenderbufferId;
}

/// Index of a texture sampling unit
pub type TextureUnit = u8;

/// Number of texture units whose bindings the context tracks
pub const MAX_TEXTURE_UNITS: usize = 8;

// ===== GEOMETRY =====

/// Pixel extent of a texture, renderbuffer or framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<glam::UVec2> for Size {
    fn from(v: glam::UVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Size> for glam::UVec2 {
    fn from(size: Size) -> Self {
        glam::UVec2::new(size.width, size.height)
    }
}

/// Viewport rectangle, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

impl Viewport {
    pub const fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, size }
    }
}

/// Scissor box, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect2D {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

// ===== FORMATS =====

/// Pixel format of a texture or of a read-back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit red, green, blue, alpha
    Rgba,
    /// 8-bit alpha only
    Alpha,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba => 4,
            TextureFormat::Alpha => 1,
        }
    }
}

/// Storage kind of a renderbuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderbufferType {
    Rgba,
    DepthComponent,
}

impl RenderbufferType {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            RenderbufferType::Rgba => 4,
            RenderbufferType::DepthComponent => 4,
        }
    }
}

/// Texture minification/magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Linear,
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureWrap {
    #[default]
    Clamp,
    Repeat,
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    /// An attachment has the wrong kind (e.g. a color buffer as depth)
    IncompleteAttachment,
    /// No color attachment, or an attachment was deleted
    IncompleteMissingAttachment,
    /// Attachments do not share the same size
    IncompleteDimensions,
    Unsupported,
}

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
