/// Texture - CPU pixel storage for the headless backend
///
/// Rows are stored bottom-up (row 0 is the bottom of the image), the same
/// orientation the driver uses for viewports, scissor boxes and read-back.

use glam::Vec4;
use mapgl_engine::mapgl::gl::{Rect2D, Size, TextureFilter, TextureFormat, TextureWrap};

/// Half-open pixel rectangle, already clipped to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub(crate) fn full(size: Size) -> Self {
        Self { x0: 0, y0: 0, x1: size.width, y1: size.height }
    }

    /// Intersection of `rect` with a target of `size` (None if empty)
    pub(crate) fn clipped(rect: Rect2D, size: Size) -> Option<Self> {
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.width as i64).min(size.width as i64);
        let y1 = (rect.y as i64 + rect.height as i64).min(size.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self { x0: x0 as u32, y0: y0 as u32, x1: x1 as u32, y1: y1 as u32 })
    }
}

/// Convert a normalized color to 8-bit channels
pub(crate) fn color_to_bytes(color: Vec4) -> [u8; 4] {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, c.w.round() as u8]
}

/// Texture storage
pub(crate) struct HeadlessTexture {
    size: Size,
    format: TextureFormat,
    /// Sampling parameters set through `set_texture_parameters`
    pub(crate) filter: TextureFilter,
    pub(crate) wrap_x: TextureWrap,
    pub(crate) wrap_y: TextureWrap,
    pixels: Vec<u8>,
}

impl HeadlessTexture {
    /// New texture, zero-filled (transparent black)
    pub(crate) fn new(size: Size, format: TextureFormat) -> Self {
        Self {
            size,
            format,
            filter: TextureFilter::default(),
            wrap_x: TextureWrap::default(),
            wrap_y: TextureWrap::default(),
            pixels: vec![0; Self::byte_size_of(size, format)],
        }
    }

    pub(crate) fn byte_size_of(size: Size, format: TextureFormat) -> usize {
        size.area() * format.bytes_per_pixel()
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Set every pixel of `rect` to `color`
    ///
    /// Alpha textures only keep the alpha channel.
    pub(crate) fn fill(&mut self, rect: PixelRect, color: [u8; 4]) {
        let bpp = self.format.bytes_per_pixel();
        let stride = self.size.width as usize * bpp;
        for y in rect.y0..rect.y1 {
            let row = y as usize * stride;
            for x in rect.x0..rect.x1 {
                let offset = row + x as usize * bpp;
                match self.format {
                    TextureFormat::Rgba => self.pixels[offset..offset + 4].copy_from_slice(&color),
                    TextureFormat::Alpha => self.pixels[offset] = color[3],
                }
            }
        }
    }

    /// Copy the bottom-left `size` pixels out in `format`, bottom-up
    ///
    /// `size` must fit inside the texture.
    pub(crate) fn read(&self, size: Size, format: TextureFormat) -> Vec<u8> {
        let src_bpp = self.format.bytes_per_pixel();
        let src_stride = self.size.width as usize * src_bpp;
        let mut out = Vec::with_capacity(size.area() * format.bytes_per_pixel());

        for y in 0..size.height as usize {
            let row = &self.pixels[y * src_stride..y * src_stride + size.width as usize * src_bpp];
            match (self.format, format) {
                (TextureFormat::Rgba, TextureFormat::Rgba)
                | (TextureFormat::Alpha, TextureFormat::Alpha) => out.extend_from_slice(row),
                (TextureFormat::Rgba, TextureFormat::Alpha) => {
                    out.extend(row.chunks_exact(4).map(|p| p[3]));
                }
                (TextureFormat::Alpha, TextureFormat::Rgba) => {
                    for a in row {
                        out.extend_from_slice(&[0, 0, 0, *a]);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "headless_texture_tests.rs"]
mod tests;
