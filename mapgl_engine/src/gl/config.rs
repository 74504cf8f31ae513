/// Context configuration

#[derive(Debug, Clone)]
pub struct Config {
    /// Check framebuffer completeness after every framebuffer creation
    pub enable_validation: bool,
    /// Reorder read-back rows so the first row is the top of the image
    pub flip_read_back: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            flip_read_back: true,
        }
    }
}
