/// Unique ownership of driver objects with deferred deletion
///
/// Dropping a handle never calls the driver. The id is queued on the
/// abandoned list of the context that created it, and the context deletes
/// it on its next `perform_cleanup()`. Handles can therefore be dropped on
/// any thread and on any exit path.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::gl::{ContextId, FramebufferId, RenderbufferId, TextureId};

/// Objects released by their owners but not yet deleted by the driver
#[derive(Debug, Default)]
pub(crate) struct AbandonedObjects {
    pub textures: Vec<TextureId>,
    pub framebuffers: Vec<FramebufferId>,
    pub renderbuffers: Vec<RenderbufferId>,
}

impl AbandonedObjects {
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty() && self.framebuffers.is_empty() && self.renderbuffers.is_empty()
    }
}

pub(crate) type AbandonedQueue = Arc<Mutex<AbandonedObjects>>;

/// Driver object id that knows which abandoned list it belongs on
pub(crate) trait ObjectId: Copy + fmt::Debug {
    fn abandon(self, objects: &mut AbandonedObjects);
}

impl ObjectId for TextureId {
    fn abandon(self, objects: &mut AbandonedObjects) {
        objects.textures.push(self);
    }
}

impl ObjectId for FramebufferId {
    fn abandon(self, objects: &mut AbandonedObjects) {
        objects.framebuffers.push(self);
    }
}

impl ObjectId for RenderbufferId {
    fn abandon(self, objects: &mut AbandonedObjects) {
        objects.renderbuffers.push(self);
    }
}

/// Single owner of a driver object
///
/// Not `Clone`: moving the handle transfers ownership, and the object is
/// abandoned exactly once, when the last owner drops it.
#[derive(Debug)]
pub(crate) struct Unique<I: ObjectId> {
    id: I,
    context: ContextId,
    abandoned: AbandonedQueue,
}

impl<I: ObjectId> Unique<I> {
    pub fn new(id: I, context: ContextId, abandoned: AbandonedQueue) -> Self {
        Self { id, context, abandoned }
    }

    pub fn id(&self) -> I {
        self.id
    }

    /// Context whose driver minted the id
    pub fn context(&self) -> ContextId {
        self.context
    }
}

impl<I: ObjectId> Drop for Unique<I> {
    fn drop(&mut self) {
        // A poisoned queue means the context thread panicked; the object leaks
        if let Ok(mut objects) = self.abandoned.lock() {
            self.id.abandon(&mut objects);
        }
    }
}

pub(crate) type UniqueTexture = Unique<TextureId>;
pub(crate) type UniqueFramebuffer = Unique<FramebufferId>;
pub(crate) type UniqueRenderbuffer = Unique<RenderbufferId>;
