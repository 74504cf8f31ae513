/// Mock Backend for unit tests (no driver required)
///
/// Records every driver call so tests can assert exactly what the Context
/// and the objects built on it sent to the driver. Object ids are minted
/// from real slot maps, so stale ids behave like they would on a driver.

use std::sync::{Arc, Mutex};

use glam::Vec4;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::gl::{
    Backend, ClearMask, FramebufferId, FramebufferStatus, Rect2D, RenderbufferId,
    RenderbufferType, Size, TextureFilter, TextureFormat, TextureId, TextureUnit, TextureWrap,
    Viewport,
};

// ============================================================================
// Recorded calls
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateTexture { size: Size, format: TextureFormat },
    DeleteTexture(TextureId),
    BindTexture(Option<TextureId>),
    SetTextureParameters { filter: TextureFilter, wrap_x: TextureWrap, wrap_y: TextureWrap },
    CreateRenderbuffer { kind: RenderbufferType, size: Size },
    DeleteRenderbuffer(RenderbufferId),
    CreateFramebuffer { color: TextureId, depth: Option<RenderbufferId> },
    DeleteFramebuffer(FramebufferId),
    BindFramebuffer(Option<FramebufferId>),
    SetActiveTextureUnit(TextureUnit),
    SetScissorTest(bool),
    SetScissorBox(Rect2D),
    SetViewport(Viewport),
    SetClearColor(Vec4),
    SetClearDepth(f32),
    SetClearStencil(i32),
    Clear(ClearMask),
    ReadPixels { size: Size, format: TextureFormat },
}

impl BackendCall {
    /// Operation name, as used by `MockLog::count()` and `MockLog::fail()`
    pub fn name(&self) -> &'static str {
        match self {
            BackendCall::CreateTexture { .. } => "create_texture",
            BackendCall::DeleteTexture(_) => "delete_texture",
            BackendCall::BindTexture(_) => "bind_texture",
            BackendCall::SetTextureParameters { .. } => "set_texture_parameters",
            BackendCall::CreateRenderbuffer { .. } => "create_renderbuffer",
            BackendCall::DeleteRenderbuffer(_) => "delete_renderbuffer",
            BackendCall::CreateFramebuffer { .. } => "create_framebuffer",
            BackendCall::DeleteFramebuffer(_) => "delete_framebuffer",
            BackendCall::BindFramebuffer(_) => "bind_framebuffer",
            BackendCall::SetActiveTextureUnit(_) => "set_active_texture_unit",
            BackendCall::SetScissorTest(_) => "set_scissor_test",
            BackendCall::SetScissorBox(_) => "set_scissor_box",
            BackendCall::SetViewport(_) => "set_viewport",
            BackendCall::SetClearColor(_) => "set_clear_color",
            BackendCall::SetClearDepth(_) => "set_clear_depth",
            BackendCall::SetClearStencil(_) => "set_clear_stencil",
            BackendCall::Clear(_) => "clear",
            BackendCall::ReadPixels { .. } => "read_pixels",
        }
    }
}

// ============================================================================
// Shared log
// ============================================================================

/// Test-side view of a MockBackend that has been moved into a Context
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    failing: Arc<Mutex<FxHashSet<&'static str>>>,
}

impl MockLog {
    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls of operation `name`
    pub fn count(&self, name: &str) -> usize {
        self.counts().get(name).copied().unwrap_or(0)
    }

    /// Number of recorded calls per operation
    pub fn counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for call in self.calls.lock().unwrap().iter() {
            *counts.entry(call.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Last recorded call, if any
    pub fn last(&self) -> Option<BackendCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every later call of `name` fail with `Error::OutOfMemory`
    ///
    /// For `framebuffer_status`, the check reports `Unsupported` instead.
    pub fn fail(&self, name: &'static str) {
        self.failing.lock().unwrap().insert(name);
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn is_failing(&self, name: &str) -> bool {
        self.failing.lock().unwrap().contains(name)
    }
}

// ============================================================================
// Mock Backend
// ============================================================================

pub struct MockBackend {
    log: MockLog,
    textures: SlotMap<TextureId, Size>,
    renderbuffers: SlotMap<RenderbufferId, (RenderbufferType, Size)>,
    framebuffers: SlotMap<FramebufferId, (TextureId, Option<RenderbufferId>)>,
}

impl MockBackend {
    /// Create a mock backend and the log observing it
    pub fn new() -> (Self, MockLog) {
        let log = MockLog::default();
        let backend = Self {
            log: log.clone(),
            textures: SlotMap::with_key(),
            renderbuffers: SlotMap::with_key(),
            framebuffers: SlotMap::with_key(),
        };
        (backend, log)
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.log.is_failing(name) {
            return Err(Error::OutOfMemory);
        }
        Ok(())
    }
}

impl Backend for MockBackend {
    fn create_texture(&mut self, size: Size, format: TextureFormat) -> Result<TextureId> {
        self.log.record(BackendCall::CreateTexture { size, format });
        self.check("create_texture")?;
        Ok(self.textures.insert(size))
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.log.record(BackendCall::DeleteTexture(id));
        self.textures.remove(id);
    }

    fn bind_texture(&mut self, id: Option<TextureId>) {
        self.log.record(BackendCall::BindTexture(id));
    }

    fn set_texture_parameters(&mut self, filter: TextureFilter, wrap_x: TextureWrap, wrap_y: TextureWrap) {
        self.log.record(BackendCall::SetTextureParameters { filter, wrap_x, wrap_y });
    }

    fn create_renderbuffer(&mut self, kind: RenderbufferType, size: Size) -> Result<RenderbufferId> {
        self.log.record(BackendCall::CreateRenderbuffer { kind, size });
        self.check("create_renderbuffer")?;
        Ok(self.renderbuffers.insert((kind, size)))
    }

    fn delete_renderbuffer(&mut self, id: RenderbufferId) {
        self.log.record(BackendCall::DeleteRenderbuffer(id));
        self.renderbuffers.remove(id);
    }

    fn create_framebuffer(&mut self, color: TextureId, depth: Option<RenderbufferId>) -> Result<FramebufferId> {
        self.log.record(BackendCall::CreateFramebuffer { color, depth });
        self.check("create_framebuffer")?;
        Ok(self.framebuffers.insert((color, depth)))
    }

    fn delete_framebuffer(&mut self, id: FramebufferId) {
        self.log.record(BackendCall::DeleteFramebuffer(id));
        self.framebuffers.remove(id);
    }

    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus {
        if self.log.is_failing("framebuffer_status") {
            return FramebufferStatus::Unsupported;
        }
        let Some((color, depth)) = self.framebuffers.get(id) else {
            return FramebufferStatus::IncompleteMissingAttachment;
        };
        let Some(color_size) = self.textures.get(*color) else {
            return FramebufferStatus::IncompleteMissingAttachment;
        };
        match depth.map(|d| self.renderbuffers.get(d)) {
            None => FramebufferStatus::Complete,
            Some(None) => FramebufferStatus::IncompleteMissingAttachment,
            Some(Some((RenderbufferType::DepthComponent, size))) if size == color_size => {
                FramebufferStatus::Complete
            }
            Some(Some((RenderbufferType::DepthComponent, _))) => FramebufferStatus::IncompleteDimensions,
            Some(Some(_)) => FramebufferStatus::IncompleteAttachment,
        }
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        self.log.record(BackendCall::BindFramebuffer(id));
    }

    fn set_active_texture_unit(&mut self, unit: TextureUnit) {
        self.log.record(BackendCall::SetActiveTextureUnit(unit));
    }

    fn set_scissor_test(&mut self, enabled: bool) {
        self.log.record(BackendCall::SetScissorTest(enabled));
    }

    fn set_scissor_box(&mut self, rect: Rect2D) {
        self.log.record(BackendCall::SetScissorBox(rect));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.log.record(BackendCall::SetViewport(viewport));
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.log.record(BackendCall::SetClearColor(color));
    }

    fn set_clear_depth(&mut self, depth: f32) {
        self.log.record(BackendCall::SetClearDepth(depth));
    }

    fn set_clear_stencil(&mut self, stencil: i32) {
        self.log.record(BackendCall::SetClearStencil(stencil));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.log.record(BackendCall::Clear(mask));
    }

    /// Every byte of bottom-up row `r` holds `r`, so tests can see the row order
    fn read_pixels(&mut self, size: Size, format: TextureFormat) -> Result<Vec<u8>> {
        self.log.record(BackendCall::ReadPixels { size, format });
        self.check("read_pixels")?;
        let stride = size.width as usize * format.bytes_per_pixel();
        let mut data = Vec::with_capacity(stride * size.height as usize);
        for row in 0..size.height {
            data.extend(std::iter::repeat(row as u8).take(stride));
        }
        Ok(data)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
