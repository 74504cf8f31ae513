//! Off-screen render target
//!
//! An `OffscreenTexture` lets a renderer draw into a texture instead of the
//! screen, then either read the pixels back or sample the texture in a later
//! pass (e.g. a map thumbnail, or a 3D layer composited over the base map).
//!
//! GPU objects are created lazily: constructing a target costs nothing, and
//! the color texture and framebuffer are allocated together on the first
//! `bind()`. They are reused by every later bind and released when the
//! target is dropped. A depth renderbuffer can be borrowed from the caller;
//! it is attached, never allocated or freed here.
//!
//! # Example
//!
//! ```no_run
//! use mapgl_engine::mapgl::gl::{Context, Size};
//! use mapgl_engine::mapgl::util::OffscreenTexture;
//!
//! # fn render(context: &mut Context) -> mapgl_engine::mapgl::Result<()> {
//! let mut target = OffscreenTexture::new(context, Size::new(256, 256));
//! target.bind(context)?;
//! // ... draw ...
//! let image = target.read_still_image(context)?;
//! assert_eq!(image.size(), Size::new(256, 256));
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::gl::{
    Context, ContextId, DepthComponent, Framebuffer, Renderbuffer, Size, Texture,
    TextureFormat, Viewport,
};
use crate::util::image::PremultipliedImage;

const SOURCE: &str = "mapgl::OffscreenTexture";

/// Objects created by the first bind; they only ever exist together
struct Attachments {
    framebuffer: Framebuffer,
    texture: Texture,
}

/// Lazily allocated color texture + framebuffer of a fixed size
///
/// `'d` is the lifetime of the borrowed depth renderbuffer, if any; the
/// borrow checker guarantees the depth buffer outlives the target.
/// Not `Clone`: a target owns its GPU objects and releases them exactly once.
pub struct OffscreenTexture<'d> {
    context: ContextId,
    size: Size,
    depth: Option<&'d Renderbuffer<DepthComponent>>,
    attachments: Option<Attachments>,
}

impl<'d> OffscreenTexture<'d> {
    /// Color-only target; drawing into it cannot use depth testing
    ///
    /// Panics if `size` is empty.
    pub fn new(context: &Context, size: Size) -> Self {
        assert!(!size.is_empty(), "offscreen texture size must be non-empty, got {:?}", size);
        Self {
            context: context.id(),
            size,
            depth: None,
            attachments: None,
        }
    }

    /// Target that depth-tests against a caller-owned depth renderbuffer
    ///
    /// Panics if `size` is empty or `depth` was created by another context.
    /// The depth buffer must have the same size; a mismatch surfaces as an
    /// error from the first `bind()`.
    pub fn with_depth(context: &Context, size: Size, depth: &'d Renderbuffer<DepthComponent>) -> Self {
        assert!(!size.is_empty(), "offscreen texture size must be non-empty, got {:?}", size);
        assert_eq!(
            depth.context(),
            context.id(),
            "depth renderbuffer belongs to a context other than the target's"
        );
        Self {
            context: context.id(),
            size,
            depth: Some(depth),
            attachments: None,
        }
    }

    /// Prepare the target to receive draw calls
    ///
    /// The first call creates the texture and framebuffer (which leaves the
    /// framebuffer bound); later calls rebind the existing framebuffer. Every
    /// call resets the active texture unit to 0, disables the scissor test
    /// and sets the viewport to cover the whole target.
    pub fn bind(&mut self, context: &mut Context) -> Result<()> {
        self.assert_context(context);

        match &self.attachments {
            None => {
                let texture = context.create_texture(self.size, TextureFormat::Rgba)?;
                let framebuffer = match self.depth {
                    Some(depth) => context.create_framebuffer_with_depth(&texture, depth)?,
                    None => context.create_framebuffer(&texture)?,
                };
                crate::engine_debug!(
                    SOURCE,
                    "Allocated {}x{} target (depth: {})",
                    self.size.width,
                    self.size.height,
                    self.depth.is_some()
                );
                self.attachments = Some(Attachments { framebuffer, texture });
            }
            Some(attachments) => {
                context.set_bind_framebuffer(Some(attachments.framebuffer.id()));
            }
        }

        context.set_active_texture_unit(0);
        context.set_scissor_test(false);
        context.set_viewport(Viewport::new(0, 0, self.size));
        Ok(())
    }

    /// Read the whole target back from the currently bound framebuffer
    ///
    /// Every call reads from the driver. Panics if the target was never bound.
    pub fn read_still_image(&self, context: &mut Context) -> Result<PremultipliedImage> {
        self.assert_context(context);
        assert!(self.attachments.is_some(), "read_still_image() called before bind()");
        context.read_framebuffer(self.size)
    }

    /// Color texture, for sampling the result in a later pass
    ///
    /// Panics if the target was never bound.
    pub fn texture(&self) -> &Texture {
        match &self.attachments {
            Some(attachments) => &attachments.texture,
            None => panic!("texture() called before bind()"),
        }
    }

    /// Mutable color texture, for `Context::bind_texture()`
    ///
    /// Panics if the target was never bound.
    pub fn texture_mut(&mut self) -> &mut Texture {
        match &mut self.attachments {
            Some(attachments) => &mut attachments.texture,
            None => panic!("texture_mut() called before bind()"),
        }
    }

    /// Framebuffer, once allocated
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.attachments.as_ref().map(|a| &a.framebuffer)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether the first bind has allocated the GPU objects
    pub fn is_allocated(&self) -> bool {
        self.attachments.is_some()
    }

    fn assert_context(&self, context: &Context) {
        assert_eq!(
            context.id(),
            self.context,
            "offscreen texture used with a context other than the one it was created for"
        );
    }
}

#[cfg(test)]
#[path = "offscreen_texture_tests.rs"]
mod tests;
