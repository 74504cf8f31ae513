/// Renderbuffer object, typed by its storage kind

use std::fmt;
use std::marker::PhantomData;

use crate::gl::object::UniqueRenderbuffer;
use crate::gl::{ContextId, RenderbufferId, RenderbufferType, Size};

/// Compile-time renderbuffer kind
pub trait RenderbufferKind {
    const TYPE: RenderbufferType;
}

/// Color storage
#[derive(Debug)]
pub enum Rgba {}

/// Depth storage, attachable as a framebuffer's depth attachment
#[derive(Debug)]
pub enum DepthComponent {}

impl RenderbufferKind for Rgba {
    const TYPE: RenderbufferType = RenderbufferType::Rgba;
}

impl RenderbufferKind for DepthComponent {
    const TYPE: RenderbufferType = RenderbufferType::DepthComponent;
}

/// Renderbuffer created via `Context::create_renderbuffer::<K>()`
///
/// The kind parameter keeps a color renderbuffer from being passed where a
/// depth attachment is expected.
pub struct Renderbuffer<K: RenderbufferKind> {
    size: Size,
    object: UniqueRenderbuffer,
    _kind: PhantomData<K>,
}

impl<K: RenderbufferKind> Renderbuffer<K> {
    pub(crate) fn new(size: Size, object: UniqueRenderbuffer) -> Self {
        Self { size, object, _kind: PhantomData }
    }

    pub fn id(&self) -> RenderbufferId {
        self.object.id()
    }

    /// Context that created this object
    pub fn context(&self) -> ContextId {
        self.object.context()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn kind(&self) -> RenderbufferType {
        K::TYPE
    }
}

impl<K: RenderbufferKind> fmt::Debug for Renderbuffer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderbuffer")
            .field("kind", &K::TYPE)
            .field("size", &self.size)
            .field("id", &self.object.id())
            .finish()
    }
}
