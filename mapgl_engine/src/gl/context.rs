/// GPU context - object factory and cached driver state
///
/// The Context is the only code that talks to the `Backend`. It owns the
/// driver, mirrors global binding state in `State` values so redundant calls
/// are skipped, and deletes objects whose handles were dropped.
///
/// All methods take `&mut self`: a context belongs to one rendering thread
/// and every state mutation goes through a single exclusive borrow.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use glam::Vec4;

use crate::error::{Error, Result};
use crate::gl::object::{AbandonedObjects, AbandonedQueue, Unique};
use crate::gl::{
    Backend, ClearMask, Config, DepthComponent, Framebuffer, FramebufferId, FramebufferStatus,
    Rect2D, Renderbuffer, RenderbufferKind, Size, State, Texture, TextureFilter, TextureFormat,
    TextureId, TextureUnit, TextureWrap, Viewport, MAX_TEXTURE_UNITS,
};
use crate::util::image::{Image, ImageKind};

const SOURCE: &str = "mapgl::gl::Context";

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a Context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

/// Live driver objects created through a context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    pub textures: u32,
    pub framebuffers: u32,
    pub renderbuffers: u32,
}

impl ContextStats {
    pub fn total(&self) -> u32 {
        self.textures + self.framebuffers + self.renderbuffers
    }
}

pub struct Context {
    id: ContextId,
    config: Config,
    backend: Box<dyn Backend>,
    abandoned: AbandonedQueue,
    stats: ContextStats,

    bind_framebuffer: State<Option<FramebufferId>>,
    active_texture_unit: State<TextureUnit>,
    texture: [State<Option<TextureId>>; MAX_TEXTURE_UNITS],
    scissor_test: State<bool>,
    scissor_box: State<Rect2D>,
    viewport: State<Viewport>,
    clear_color: State<Vec4>,
    clear_depth: State<f32>,
    clear_stencil: State<i32>,
}

impl Context {
    /// Wrap a freshly created driver
    ///
    /// Binding state starts at the driver defaults (default framebuffer, unit 0,
    /// no textures, scissor test off, clear to transparent black, depth 1,
    /// stencil 0). Viewport and scissor box depend on the
    /// surface, so they start dirty and are always sent on first use.
    pub fn new<B: Backend + 'static>(backend: B, config: Config) -> Self {
        let mut viewport = State::new(Viewport::default());
        viewport.set_dirty();
        let mut scissor_box = State::new(Rect2D::default());
        scissor_box.set_dirty();

        let id = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
        crate::engine_debug!(SOURCE, "Created context {:?} (validation: {})", id, config.enable_validation);

        Self {
            id,
            config,
            backend: Box::new(backend),
            abandoned: Arc::new(Mutex::new(AbandonedObjects::default())),
            stats: ContextStats::default(),
            bind_framebuffer: State::new(None),
            active_texture_unit: State::new(0),
            texture: [State::new(None); MAX_TEXTURE_UNITS],
            scissor_test: State::new(false),
            scissor_box,
            viewport,
            clear_color: State::new(Vec4::ZERO),
            clear_depth: State::new(1.0),
            clear_stencil: State::new(0),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Live object counts (objects dropped but not yet cleaned up still count)
    pub fn stats(&self) -> ContextStats {
        self.stats
    }

    /// Log a driver failure before handing it to the caller
    fn log_and_return_error(error: Error, operation: &str) -> Error {
        crate::engine_error!(SOURCE, "{} failed: {}", operation, error);
        error
    }

    /// Object ids are only meaningful to the driver that minted them
    fn assert_owned(&self, owner: ContextId, what: &str) {
        assert_eq!(
            owner, self.id,
            "{} belongs to context {:?}, used with context {:?}",
            what, owner, self.id
        );
    }

    // ===== OBJECT CREATION =====

    /// Create a texture; it is left bound at unit 0 with nearest filtering and clamping
    pub fn create_texture(&mut self, size: Size, format: TextureFormat) -> Result<Texture> {
        assert!(!size.is_empty(), "texture size must be non-empty, got {:?}", size);

        let id = self.backend.create_texture(size, format)
            .map_err(|e| Self::log_and_return_error(e, "create_texture"))?;
        let texture = Texture::new(size, format, Unique::new(id, self.id, self.abandoned.clone()));
        self.stats.textures += 1;

        self.set_active_texture_unit(0);
        let backend = &mut self.backend;
        self.texture[0].update(Some(id), |t| backend.bind_texture(t));
        let (wrap_x, wrap_y) = texture.wrap();
        self.backend.set_texture_parameters(texture.filter(), wrap_x, wrap_y);

        crate::engine_debug!(SOURCE, "Created {:?} texture {}x{}", format, size.width, size.height);
        Ok(texture)
    }

    /// Bind `texture` at `unit` for sampling, updating its sampling parameters
    ///
    /// Driver calls are only issued for what actually changes.
    pub fn bind_texture(
        &mut self,
        texture: &mut Texture,
        unit: TextureUnit,
        filter: TextureFilter,
        wrap_x: TextureWrap,
        wrap_y: TextureWrap,
    ) {
        assert!((unit as usize) < MAX_TEXTURE_UNITS, "texture unit {} out of range", unit);
        self.assert_owned(texture.context(), "texture");

        let id = Some(texture.id());
        let params_changed =
            texture.filter != filter || texture.wrap_x != wrap_x || texture.wrap_y != wrap_y;

        if params_changed {
            self.set_active_texture_unit(unit);
            let backend = &mut self.backend;
            self.texture[unit as usize].update(id, |t| backend.bind_texture(t));
            self.backend.set_texture_parameters(filter, wrap_x, wrap_y);
            texture.filter = filter;
            texture.wrap_x = wrap_x;
            texture.wrap_y = wrap_y;
        } else if self.texture[unit as usize].is_dirty() || self.texture[unit as usize].get() != id {
            self.set_active_texture_unit(unit);
            let backend = &mut self.backend;
            self.texture[unit as usize].update(id, |t| backend.bind_texture(t));
        }
    }

    /// Create a renderbuffer of kind `K`
    pub fn create_renderbuffer<K: RenderbufferKind>(&mut self, size: Size) -> Result<Renderbuffer<K>> {
        assert!(!size.is_empty(), "renderbuffer size must be non-empty, got {:?}", size);

        let id = self.backend.create_renderbuffer(K::TYPE, size)
            .map_err(|e| Self::log_and_return_error(e, "create_renderbuffer"))?;
        self.stats.renderbuffers += 1;

        crate::engine_debug!(SOURCE, "Created {:?} renderbuffer {}x{}", K::TYPE, size.width, size.height);
        Ok(Renderbuffer::new(size, Unique::new(id, self.id, self.abandoned.clone())))
    }

    /// Create a framebuffer rendering into `color`; it is left bound
    pub fn create_framebuffer(&mut self, color: &Texture) -> Result<Framebuffer> {
        self.assert_owned(color.context(), "color texture");
        let id = self.backend.create_framebuffer(color.id(), None)
            .map_err(|e| Self::log_and_return_error(e, "create_framebuffer"))?;
        let framebuffer = Framebuffer::new(
            color.size(),
            color.id(),
            None,
            Unique::new(id, self.id, self.abandoned.clone()),
        );
        self.stats.framebuffers += 1;

        self.set_bind_framebuffer(Some(id));
        self.check_framebuffer(&framebuffer)?;
        Ok(framebuffer)
    }

    /// Create a framebuffer rendering into `color`, depth-tested against `depth`
    ///
    /// The depth renderbuffer is only attached; it stays owned by the caller.
    pub fn create_framebuffer_with_depth(
        &mut self,
        color: &Texture,
        depth: &Renderbuffer<DepthComponent>,
    ) -> Result<Framebuffer> {
        self.assert_owned(color.context(), "color texture");
        self.assert_owned(depth.context(), "depth renderbuffer");
        if color.size() != depth.size() {
            return Err(Self::log_and_return_error(
                Error::InvalidResource(format!(
                    "renderbuffer size mismatch: color {:?}, depth {:?}",
                    color.size(),
                    depth.size()
                )),
                "create_framebuffer_with_depth",
            ));
        }

        let id = self.backend.create_framebuffer(color.id(), Some(depth.id()))
            .map_err(|e| Self::log_and_return_error(e, "create_framebuffer_with_depth"))?;
        let framebuffer = Framebuffer::new(
            color.size(),
            color.id(),
            Some(depth.id()),
            Unique::new(id, self.id, self.abandoned.clone()),
        );
        self.stats.framebuffers += 1;

        self.set_bind_framebuffer(Some(id));
        self.check_framebuffer(&framebuffer)?;
        Ok(framebuffer)
    }

    fn check_framebuffer(&self, framebuffer: &Framebuffer) -> Result<()> {
        if !self.config.enable_validation {
            return Ok(());
        }
        match self.backend.framebuffer_status(framebuffer.id()) {
            FramebufferStatus::Complete => Ok(()),
            status => Err(Self::log_and_return_error(
                Error::IncompleteFramebuffer(status),
                "framebuffer completeness check",
            )),
        }
    }

    // ===== READ-BACK AND CLEAR =====

    /// Read `size` pixels from the bound framebuffer
    ///
    /// The driver format follows the image kind. With `Config::flip_read_back`
    /// the first row of the image is the top of the framebuffer.
    pub fn read_framebuffer<M: ImageKind>(&mut self, size: Size) -> Result<Image<M>> {
        let data = self.backend.read_pixels(size, M::FORMAT)
            .map_err(|e| Self::log_and_return_error(e, "read_framebuffer"))?;
        let mut image = Image::<M>::new(size, data)
            .map_err(|e| Self::log_and_return_error(e, "read_framebuffer"))?;
        if self.config.flip_read_back {
            image.flip_vertical();
        }
        Ok(image)
    }

    /// Clear the bound framebuffer; `None` leaves that buffer untouched
    ///
    /// Given values become the cached clear values, so repeated clears with
    /// the same values only issue the clear itself.
    pub fn clear(&mut self, color: Option<Vec4>, depth: Option<f32>, stencil: Option<i32>) {
        let mut mask = ClearMask::empty();
        if let Some(color) = color {
            self.set_clear_color(color);
            mask |= ClearMask::COLOR;
        }
        if let Some(depth) = depth {
            self.set_clear_depth(depth);
            mask |= ClearMask::DEPTH;
        }
        if let Some(stencil) = stencil {
            self.set_clear_stencil(stencil);
            mask |= ClearMask::STENCIL;
        }
        if mask.is_empty() {
            return;
        }
        self.backend.clear(mask);
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        let backend = &mut self.backend;
        self.clear_color.update(color, |c| backend.set_clear_color(c));
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color.get()
    }

    pub fn set_clear_depth(&mut self, depth: f32) {
        let backend = &mut self.backend;
        self.clear_depth.update(depth, |d| backend.set_clear_depth(d));
    }

    pub fn clear_depth(&self) -> f32 {
        self.clear_depth.get()
    }

    pub fn set_clear_stencil(&mut self, stencil: i32) {
        let backend = &mut self.backend;
        self.clear_stencil.update(stencil, |s| backend.set_clear_stencil(s));
    }

    pub fn clear_stencil(&self) -> i32 {
        self.clear_stencil.get()
    }

    // ===== BINDING STATE =====

    /// Make `framebuffer` the draw target (`None` = default framebuffer)
    pub fn set_bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        let backend = &mut self.backend;
        self.bind_framebuffer.update(framebuffer, |f| backend.bind_framebuffer(f));
    }

    pub fn bound_framebuffer(&self) -> Option<FramebufferId> {
        self.bind_framebuffer.get()
    }

    pub fn set_active_texture_unit(&mut self, unit: TextureUnit) {
        assert!((unit as usize) < MAX_TEXTURE_UNITS, "texture unit {} out of range", unit);
        let backend = &mut self.backend;
        self.active_texture_unit.update(unit, |u| backend.set_active_texture_unit(u));
    }

    pub fn active_texture_unit(&self) -> TextureUnit {
        self.active_texture_unit.get()
    }

    /// Texture bound at `unit`
    pub fn bound_texture(&self, unit: TextureUnit) -> Option<TextureId> {
        assert!((unit as usize) < MAX_TEXTURE_UNITS, "texture unit {} out of range", unit);
        self.texture[unit as usize].get()
    }

    pub fn set_scissor_test(&mut self, enabled: bool) {
        let backend = &mut self.backend;
        self.scissor_test.update(enabled, |e| backend.set_scissor_test(e));
    }

    pub fn scissor_test(&self) -> bool {
        self.scissor_test.get()
    }

    pub fn set_scissor_box(&mut self, rect: Rect2D) {
        let backend = &mut self.backend;
        self.scissor_box.update(rect, |r| backend.set_scissor_box(r));
    }

    pub fn scissor_box(&self) -> Rect2D {
        self.scissor_box.get()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        let backend = &mut self.backend;
        self.viewport.update(viewport, |v| backend.set_viewport(v));
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Forget every cached value
    ///
    /// Call after foreign code has issued driver calls behind the context's back.
    pub fn set_dirty_state(&mut self) {
        self.bind_framebuffer.set_dirty();
        self.active_texture_unit.set_dirty();
        for unit in self.texture.iter_mut() {
            unit.set_dirty();
        }
        self.scissor_test.set_dirty();
        self.scissor_box.set_dirty();
        self.viewport.set_dirty();
        self.clear_color.set_dirty();
        self.clear_depth.set_dirty();
        self.clear_stencil.set_dirty();
    }

    // ===== CLEANUP =====

    /// Delete every object whose handle has been dropped
    ///
    /// Deleting a bound object unbinds it in the driver, so the matching cached
    /// bindings fall back to "nothing bound".
    pub fn perform_cleanup(&mut self) {
        let abandoned = match self.abandoned.lock() {
            Ok(mut objects) => std::mem::take(&mut *objects),
            Err(_) => {
                crate::engine_error!(SOURCE, "Abandoned object queue poisoned, skipping cleanup");
                return;
            }
        };
        if abandoned.is_empty() {
            return;
        }

        for id in &abandoned.framebuffers {
            if self.bind_framebuffer.get() == Some(*id) {
                self.bind_framebuffer.reset(None);
            }
            self.backend.delete_framebuffer(*id);
        }
        for id in &abandoned.textures {
            for unit in self.texture.iter_mut() {
                if unit.get() == Some(*id) {
                    unit.reset(None);
                }
            }
            self.backend.delete_texture(*id);
        }
        for id in &abandoned.renderbuffers {
            self.backend.delete_renderbuffer(*id);
        }

        self.stats.framebuffers = self.stats.framebuffers.saturating_sub(abandoned.framebuffers.len() as u32);
        self.stats.textures = self.stats.textures.saturating_sub(abandoned.textures.len() as u32);
        self.stats.renderbuffers = self.stats.renderbuffers.saturating_sub(abandoned.renderbuffers.len() as u32);

        crate::engine_debug!(
            SOURCE,
            "Deleted {} framebuffers, {} textures, {} renderbuffers",
            abandoned.framebuffers.len(),
            abandoned.textures.len(),
            abandoned.renderbuffers.len()
        );
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.perform_cleanup();
        if self.stats.total() > 0 {
            crate::engine_warn!(
                SOURCE,
                "Context {:?} dropped with {} live objects; they are released with the driver",
                self.id,
                self.stats.total()
            );
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
