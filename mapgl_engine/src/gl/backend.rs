/// Backend trait - the raw driver seam below the state-caching Context

use glam::Vec4;

use crate::error::Result;
use crate::gl::{
    ClearMask, FramebufferId, FramebufferStatus, Rect2D, RenderbufferId, RenderbufferType,
    Size, TextureFilter, TextureFormat, TextureId, TextureUnit, TextureWrap, Viewport,
};

/// Raw driver interface
///
/// Implemented by concrete drivers (e.g. `HeadlessBackend`). Every method maps
/// to one driver call; no method caches state, that is the Context's job.
/// Objects are never deleted implicitly: the Context calls the matching
/// `delete_*` once the owning handle has been dropped.
pub trait Backend: Send {
    /// Allocate an uninitialized texture
    fn create_texture(&mut self, size: Size, format: TextureFormat) -> Result<TextureId>;

    /// Free a texture
    fn delete_texture(&mut self, id: TextureId);

    /// Bind `id` to the currently active texture unit (`None` unbinds)
    fn bind_texture(&mut self, id: Option<TextureId>);

    /// Set the sampling parameters of the texture bound to the active unit
    fn set_texture_parameters(&mut self, filter: TextureFilter, wrap_x: TextureWrap, wrap_y: TextureWrap);

    /// Allocate a renderbuffer
    fn create_renderbuffer(&mut self, kind: RenderbufferType, size: Size) -> Result<RenderbufferId>;

    /// Free a renderbuffer
    fn delete_renderbuffer(&mut self, id: RenderbufferId);

    /// Allocate a framebuffer with `color` as color attachment 0 and an optional depth attachment
    fn create_framebuffer(&mut self, color: TextureId, depth: Option<RenderbufferId>) -> Result<FramebufferId>;

    /// Free a framebuffer
    fn delete_framebuffer(&mut self, id: FramebufferId);

    /// Check that a framebuffer can be rendered into
    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus;

    /// Make `id` the draw/read framebuffer (`None` = default framebuffer)
    fn bind_framebuffer(&mut self, id: Option<FramebufferId>);

    fn set_active_texture_unit(&mut self, unit: TextureUnit);

    fn set_scissor_test(&mut self, enabled: bool);

    fn set_scissor_box(&mut self, rect: Rect2D);

    fn set_viewport(&mut self, viewport: Viewport);

    /// Value written by color clears
    fn set_clear_color(&mut self, color: Vec4);

    /// Value written by depth clears
    fn set_clear_depth(&mut self, depth: f32);

    /// Value written by stencil clears
    fn set_clear_stencil(&mut self, stencil: i32);

    /// Clear the buffers in `mask` of the bound framebuffer with the current clear values
    fn clear(&mut self, mask: ClearMask);

    /// Read `size` pixels from the bound framebuffer, starting at the origin
    ///
    /// Rows are tightly packed and bottom-up: the first row returned is the
    /// bottom row of the framebuffer.
    fn read_pixels(&mut self, size: Size, format: TextureFormat) -> Result<Vec<u8>>;
}
