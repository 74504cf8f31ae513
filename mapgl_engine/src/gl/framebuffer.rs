/// Framebuffer object - groups a color texture and an optional depth renderbuffer
///
/// Created once and reused every frame. Holds only the ids of its
/// attachments; the attachments themselves stay owned by whoever created
/// them, so dropping a framebuffer never frees its texture or depth buffer.

use crate::gl::object::UniqueFramebuffer;
use crate::gl::{ContextId, FramebufferId, RenderbufferId, Size, TextureId};

#[derive(Debug)]
pub struct Framebuffer {
    size: Size,
    color: TextureId,
    depth: Option<RenderbufferId>,
    object: UniqueFramebuffer,
}

impl Framebuffer {
    pub(crate) fn new(
        size: Size,
        color: TextureId,
        depth: Option<RenderbufferId>,
        object: UniqueFramebuffer,
    ) -> Self {
        Self { size, color, depth, object }
    }

    pub fn id(&self) -> FramebufferId {
        self.object.id()
    }

    /// Context that created this object
    pub fn context(&self) -> ContextId {
        self.object.context()
    }

    /// Size in pixels (equal to the color attachment's)
    pub fn size(&self) -> Size {
        self.size
    }

    /// Texture bound as color attachment 0
    pub fn color_attachment(&self) -> TextureId {
        self.color
    }

    /// Renderbuffer bound as depth attachment, if any
    pub fn depth_attachment(&self) -> Option<RenderbufferId> {
        self.depth
    }
}
