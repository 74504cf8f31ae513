/// Texture object owned by its creator

use crate::gl::object::UniqueTexture;
use crate::gl::{ContextId, Size, TextureFilter, TextureFormat, TextureId, TextureWrap};

/// Texture created via `Context::create_texture()`
///
/// Carries the sampling parameters last applied to the driver so that
/// `Context::bind_texture()` only re-sends them when they change.
/// The driver texture is released when this value is dropped.
#[derive(Debug)]
pub struct Texture {
    size: Size,
    format: TextureFormat,
    pub(crate) filter: TextureFilter,
    pub(crate) wrap_x: TextureWrap,
    pub(crate) wrap_y: TextureWrap,
    object: UniqueTexture,
}

impl Texture {
    pub(crate) fn new(size: Size, format: TextureFormat, object: UniqueTexture) -> Self {
        Self {
            size,
            format,
            filter: TextureFilter::Nearest,
            wrap_x: TextureWrap::Clamp,
            wrap_y: TextureWrap::Clamp,
            object,
        }
    }

    pub fn id(&self) -> TextureId {
        self.object.id()
    }

    /// Context that created this object
    pub fn context(&self) -> ContextId {
        self.object.context()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    pub fn wrap(&self) -> (TextureWrap, TextureWrap) {
        (self.wrap_x, self.wrap_y)
    }
}
