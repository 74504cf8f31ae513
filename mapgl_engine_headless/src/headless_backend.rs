/// HeadlessBackend - software implementation of the mapgl Backend trait
///
/// Every object lives in CPU memory: textures as 8-bit pixel arrays,
/// depth renderbuffers as f32 arrays. Clears honour the scissor test and
/// read-back returns bottom-up rows, exactly like a GL driver, which makes
/// this backend suitable for tests and for rendering without a GPU.

use glam::Vec4;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use mapgl_engine::mapgl::gl::{
    Backend, ClearMask, FramebufferId, FramebufferStatus, Rect2D, RenderbufferId,
    RenderbufferType, Size, TextureFilter, TextureFormat, TextureId, TextureUnit, TextureWrap,
    Viewport,
};
use mapgl_engine::mapgl::{Error, Result};
use mapgl_engine::{engine_bail, engine_debug, engine_warn};

use crate::headless_config::HeadlessConfig;
use crate::headless_frame_buffer::{HeadlessFramebuffer, HeadlessRenderbuffer};
use crate::headless_texture::{color_to_bytes, HeadlessTexture, PixelRect};

const SOURCE: &str = "mapgl::headless";

#[cfg(feature = "trace-calls")]
macro_rules! trace_call {
    ($($arg:tt)*) => {
        mapgl_engine::engine_trace!(SOURCE, $($arg)*)
    };
}

#[cfg(not(feature = "trace-calls"))]
macro_rules! trace_call {
    ($($arg:tt)*) => {
        ()
    };
}

/// Software driver
pub struct HeadlessBackend {
    config: HeadlessConfig,

    textures: SlotMap<TextureId, HeadlessTexture>,
    renderbuffers: SlotMap<RenderbufferId, HeadlessRenderbuffer>,
    framebuffers: SlotMap<FramebufferId, HeadlessFramebuffer>,
    used_memory: usize,

    /// Default framebuffer
    surface_color: HeadlessTexture,
    surface_depth: HeadlessRenderbuffer,

    bound_framebuffer: Option<FramebufferId>,
    active_texture_unit: TextureUnit,
    bound_textures: FxHashMap<TextureUnit, TextureId>,
    scissor_test: bool,
    scissor_box: Rect2D,
    viewport: Viewport,
    clear_color: Vec4,
    clear_depth: f32,
    clear_stencil: i32,
}

impl HeadlessBackend {
    pub fn new(config: HeadlessConfig) -> Self {
        let surface = config.surface_size;
        engine_debug!(
            SOURCE,
            "Created headless backend (surface {}x{}, budget {} bytes)",
            surface.width,
            surface.height,
            config.memory_budget
        );

        Self {
            config,
            textures: SlotMap::with_key(),
            renderbuffers: SlotMap::with_key(),
            framebuffers: SlotMap::with_key(),
            used_memory: 0,
            surface_color: HeadlessTexture::new(surface, TextureFormat::Rgba),
            surface_depth: HeadlessRenderbuffer::new(RenderbufferType::DepthComponent, surface),
            bound_framebuffer: None,
            active_texture_unit: 0,
            bound_textures: FxHashMap::default(),
            scissor_test: false,
            scissor_box: Rect2D::new(0, 0, surface.width, surface.height),
            viewport: Viewport::new(0, 0, surface),
            clear_color: Vec4::ZERO,
            clear_depth: 1.0,
            clear_stencil: 0,
        }
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    // ===== INSPECTION =====

    /// Bytes held by textures and renderbuffers
    pub fn used_memory(&self) -> usize {
        self.used_memory
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn renderbuffer_count(&self) -> usize {
        self.renderbuffers.len()
    }

    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    pub fn bound_framebuffer(&self) -> Option<FramebufferId> {
        self.bound_framebuffer
    }

    pub fn bound_texture(&self, unit: TextureUnit) -> Option<TextureId> {
        self.bound_textures.get(&unit).copied()
    }

    /// Current clear color, depth and stencil values
    pub fn clear_values(&self) -> (Vec4, f32, i32) {
        (self.clear_color, self.clear_depth, self.clear_stencil)
    }

    pub fn active_texture_unit(&self) -> TextureUnit {
        self.active_texture_unit
    }

    pub fn scissor_test(&self) -> bool {
        self.scissor_test
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Filter and wrap modes of a texture
    pub fn texture_parameters(&self, id: TextureId) -> Option<(TextureFilter, TextureWrap, TextureWrap)> {
        self.textures.get(id).map(|t| (t.filter, t.wrap_x, t.wrap_y))
    }

    /// Depth value at (x, y) of a depth renderbuffer, bottom-up
    pub fn renderbuffer_depth(&self, id: RenderbufferId, x: u32, y: u32) -> Option<f32> {
        self.renderbuffers.get(id).and_then(|r| r.depth_at(x, y))
    }

    // ===== ALLOCATION =====

    fn check_size(&self, size: Size, what: &str) -> Result<()> {
        if size.is_empty() {
            return Err(Error::InvalidResource(format!("{} size must be non-empty", what)));
        }
        let max = self.config.max_texture_size;
        if size.width > max || size.height > max {
            return Err(Error::InvalidResource(format!(
                "{} size {}x{} exceeds maximum {}",
                what, size.width, size.height, max
            )));
        }
        Ok(())
    }

    fn reserve(&mut self, bytes: usize) -> Result<()> {
        if self.used_memory + bytes > self.config.memory_budget {
            engine_warn!(
                SOURCE,
                "Out of memory: {} bytes requested, {} of {} in use",
                bytes,
                self.used_memory,
                self.config.memory_budget
            );
            return Err(Error::OutOfMemory);
        }
        self.used_memory += bytes;
        Ok(())
    }

    fn release(&mut self, bytes: usize) {
        self.used_memory = self.used_memory.saturating_sub(bytes);
    }

    // ===== ATTACHMENT RESOLUTION =====

    /// Color buffer of the bound framebuffer
    fn color_target(&self) -> Result<&HeadlessTexture> {
        match self.bound_framebuffer {
            None => Ok(&self.surface_color),
            Some(id) => {
                let framebuffer = self.framebuffers.get(id)
                    .ok_or_else(|| Error::InvalidResource("bound framebuffer was deleted".to_string()))?;
                self.textures.get(framebuffer.color)
                    .ok_or_else(|| Error::InvalidResource("framebuffer color attachment was deleted".to_string()))
            }
        }
    }

    fn color_target_mut(&mut self) -> Result<&mut HeadlessTexture> {
        match self.bound_framebuffer {
            None => Ok(&mut self.surface_color),
            Some(id) => {
                let color = self.framebuffers.get(id)
                    .ok_or_else(|| Error::InvalidResource("bound framebuffer was deleted".to_string()))?
                    .color;
                self.textures.get_mut(color)
                    .ok_or_else(|| Error::InvalidResource("framebuffer color attachment was deleted".to_string()))
            }
        }
    }

    /// Depth buffer of the bound framebuffer, if it has one
    fn depth_target_mut(&mut self) -> Option<&mut HeadlessRenderbuffer> {
        match self.bound_framebuffer {
            None => Some(&mut self.surface_depth),
            Some(id) => {
                let depth = self.framebuffers.get(id)?.depth?;
                self.renderbuffers.get_mut(depth)
            }
        }
    }

    /// Region affected by a clear of a buffer of `size`
    fn clear_rect(&self, size: Size) -> Option<PixelRect> {
        if self.scissor_test {
            PixelRect::clipped(self.scissor_box, size)
        } else {
            Some(PixelRect::full(size))
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl Backend for HeadlessBackend {
    fn create_texture(&mut self, size: Size, format: TextureFormat) -> Result<TextureId> {
        self.check_size(size, "texture")?;
        self.reserve(HeadlessTexture::byte_size_of(size, format))?;
        let id = self.textures.insert(HeadlessTexture::new(size, format));
        trace_call!("create_texture({}x{}, {:?}) -> {:?}", size.width, size.height, format, id);
        Ok(id)
    }

    fn delete_texture(&mut self, id: TextureId) {
        trace_call!("delete_texture({:?})", id);
        if let Some(texture) = self.textures.remove(id) {
            self.release(texture.byte_size());
            self.bound_textures.retain(|_, bound| *bound != id);
        }
    }

    fn bind_texture(&mut self, id: Option<TextureId>) {
        trace_call!("bind_texture(unit {}, {:?})", self.active_texture_unit, id);
        match id {
            Some(id) => {
                self.bound_textures.insert(self.active_texture_unit, id);
            }
            None => {
                self.bound_textures.remove(&self.active_texture_unit);
            }
        }
    }

    fn set_texture_parameters(&mut self, filter: TextureFilter, wrap_x: TextureWrap, wrap_y: TextureWrap) {
        trace_call!("set_texture_parameters({:?}, {:?}, {:?})", filter, wrap_x, wrap_y);
        let bound = self.bound_textures.get(&self.active_texture_unit).copied();
        match bound.and_then(|id| self.textures.get_mut(id)) {
            Some(texture) => {
                texture.filter = filter;
                texture.wrap_x = wrap_x;
                texture.wrap_y = wrap_y;
            }
            None => engine_warn!(
                SOURCE,
                "set_texture_parameters with no texture bound at unit {}",
                self.active_texture_unit
            ),
        }
    }

    fn create_renderbuffer(&mut self, kind: RenderbufferType, size: Size) -> Result<RenderbufferId> {
        self.check_size(size, "renderbuffer")?;
        self.reserve(HeadlessRenderbuffer::byte_size_of(kind, size))?;
        let id = self.renderbuffers.insert(HeadlessRenderbuffer::new(kind, size));
        trace_call!("create_renderbuffer({:?}, {}x{}) -> {:?}", kind, size.width, size.height, id);
        Ok(id)
    }

    fn delete_renderbuffer(&mut self, id: RenderbufferId) {
        trace_call!("delete_renderbuffer({:?})", id);
        if let Some(renderbuffer) = self.renderbuffers.remove(id) {
            self.release(renderbuffer.byte_size());
        }
    }

    fn create_framebuffer(&mut self, color: TextureId, depth: Option<RenderbufferId>) -> Result<FramebufferId> {
        if !self.textures.contains_key(color) {
            engine_bail!(SOURCE, "create_framebuffer: unknown color texture {:?}", color);
        }
        if let Some(depth) = depth {
            if !self.renderbuffers.contains_key(depth) {
                engine_bail!(SOURCE, "create_framebuffer: unknown depth renderbuffer {:?}", depth);
            }
        }
        let id = self.framebuffers.insert(HeadlessFramebuffer { color, depth });
        trace_call!("create_framebuffer({:?}, {:?}) -> {:?}", color, depth, id);

        // Creation leaves the new framebuffer bound
        self.bound_framebuffer = Some(id);
        Ok(id)
    }

    fn delete_framebuffer(&mut self, id: FramebufferId) {
        trace_call!("delete_framebuffer({:?})", id);
        if self.framebuffers.remove(id).is_some() && self.bound_framebuffer == Some(id) {
            self.bound_framebuffer = None;
        }
    }

    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus {
        let Some(framebuffer) = self.framebuffers.get(id) else {
            return FramebufferStatus::Unsupported;
        };
        let Some(color) = self.textures.get(framebuffer.color) else {
            return FramebufferStatus::IncompleteMissingAttachment;
        };
        if let Some(depth) = framebuffer.depth {
            let Some(depth) = self.renderbuffers.get(depth) else {
                return FramebufferStatus::IncompleteMissingAttachment;
            };
            if depth.kind() != RenderbufferType::DepthComponent {
                return FramebufferStatus::IncompleteAttachment;
            }
            if depth.size() != color.size() {
                return FramebufferStatus::IncompleteDimensions;
            }
        }
        FramebufferStatus::Complete
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        trace_call!("bind_framebuffer({:?})", id);
        self.bound_framebuffer = id;
    }

    fn set_active_texture_unit(&mut self, unit: TextureUnit) {
        trace_call!("set_active_texture_unit({})", unit);
        self.active_texture_unit = unit;
    }

    fn set_scissor_test(&mut self, enabled: bool) {
        trace_call!("set_scissor_test({})", enabled);
        self.scissor_test = enabled;
    }

    fn set_scissor_box(&mut self, rect: Rect2D) {
        trace_call!("set_scissor_box({:?})", rect);
        self.scissor_box = rect;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        trace_call!("set_viewport({:?})", viewport);
        self.viewport = viewport;
    }

    fn set_clear_color(&mut self, color: Vec4) {
        trace_call!("set_clear_color({:?})", color);
        self.clear_color = color;
    }

    fn set_clear_depth(&mut self, depth: f32) {
        trace_call!("set_clear_depth({})", depth);
        self.clear_depth = depth;
    }

    fn set_clear_stencil(&mut self, stencil: i32) {
        trace_call!("set_clear_stencil({})", stencil);
        self.clear_stencil = stencil;
    }

    fn clear(&mut self, mask: ClearMask) {
        trace_call!("clear({:?})", mask);
        let color = self.clear_color;
        let depth = self.clear_depth;

        if mask.contains(ClearMask::COLOR) {
            match self.color_target().map(|target| target.size()) {
                Ok(size) => {
                    if let Some(rect) = self.clear_rect(size) {
                        if let Ok(target) = self.color_target_mut() {
                            target.fill(rect, color_to_bytes(color));
                        }
                    }
                }
                Err(error) => engine_warn!(SOURCE, "Color clear skipped: {}", error),
            }
        }

        if mask.contains(ClearMask::DEPTH) {
            let size = self.depth_target_mut().map(|target| target.size());
            if let Some(rect) = size.and_then(|size| self.clear_rect(size)) {
                if let Some(target) = self.depth_target_mut() {
                    target.clear_depth(rect, depth);
                }
            }
        }

        // No stencil buffers are allocated, so stencil clears have no effect
    }

    fn read_pixels(&mut self, size: Size, format: TextureFormat) -> Result<Vec<u8>> {
        trace_call!("read_pixels({}x{}, {:?})", size.width, size.height, format);
        let target = self.color_target()?;
        let available = target.size();
        if size.width > available.width || size.height > available.height {
            return Err(Error::InvalidResource(format!(
                "read of {}x{} exceeds framebuffer size {}x{}",
                size.width, size.height, available.width, available.height
            )));
        }
        Ok(target.read(size, format))
    }
}

#[cfg(test)]
#[path = "headless_backend_tests.rs"]
mod tests;
