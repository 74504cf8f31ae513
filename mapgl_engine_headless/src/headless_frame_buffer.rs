/// Framebuffer and renderbuffer storage for the headless backend

use mapgl_engine::mapgl::gl::{RenderbufferId, RenderbufferType, Size, TextureId};

use crate::headless_texture::PixelRect;

/// Attachment set of a framebuffer object
///
/// Attachments are referenced by id; deleting an attached object leaves the
/// framebuffer incomplete instead of deleting it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeadlessFramebuffer {
    pub color: TextureId,
    pub depth: Option<RenderbufferId>,
}

enum Storage {
    /// Only attachable as depth, which leaves the framebuffer incomplete, so
    /// contents are never observable
    Color,
    Depth(Vec<f32>),
}

/// Renderbuffer storage
pub(crate) struct HeadlessRenderbuffer {
    kind: RenderbufferType,
    size: Size,
    storage: Storage,
}

impl HeadlessRenderbuffer {
    /// Depth renderbuffers start at the far plane
    pub(crate) fn new(kind: RenderbufferType, size: Size) -> Self {
        let storage = match kind {
            RenderbufferType::Rgba => Storage::Color,
            RenderbufferType::DepthComponent => Storage::Depth(vec![1.0; size.area()]),
        };
        Self { kind, size, storage }
    }

    pub(crate) fn byte_size_of(kind: RenderbufferType, size: Size) -> usize {
        size.area() * kind.bytes_per_pixel()
    }

    pub(crate) fn kind(&self) -> RenderbufferType {
        self.kind
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn byte_size(&self) -> usize {
        Self::byte_size_of(self.kind, self.size)
    }

    /// Set the depth of every pixel in `rect`; color renderbuffers are left alone
    pub(crate) fn clear_depth(&mut self, rect: PixelRect, depth: f32) {
        let Storage::Depth(values) = &mut self.storage else {
            return;
        };
        let depth = depth.clamp(0.0, 1.0);
        let width = self.size.width as usize;
        for y in rect.y0 as usize..rect.y1 as usize {
            values[y * width + rect.x0 as usize..y * width + rect.x1 as usize].fill(depth);
        }
    }

    /// Depth at (x, y), bottom-up; None for color renderbuffers
    pub(crate) fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        match &self.storage {
            Storage::Depth(values) => values.get(y as usize * self.size.width as usize + x as usize).copied(),
            Storage::Color => None,
        }
    }
}
