/// Headless backend configuration

use mapgl_engine::mapgl::gl::Size;

/// Limits of the software driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Size of the default framebuffer ("surface")
    pub surface_size: Size,

    /// Largest width or height accepted for textures and renderbuffers
    pub max_texture_size: u32,

    /// Bytes available to textures and renderbuffers (the surface is not counted)
    pub memory_budget: usize,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            surface_size: Size::new(512, 512),
            max_texture_size: 4096,
            memory_budget: 256 * 1024 * 1024,
        }
    }
}
