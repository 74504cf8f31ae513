//! Pixel images returned by framebuffer read-back
//!
//! An `Image<M>` is a tightly packed, row-major byte buffer whose first row
//! is the top of the image. The kind parameter records the channel layout
//! and alpha convention:
//!
//! - `Premultiplied`: RGBA, color channels already multiplied by alpha
//! - `Unassociated`: RGBA, straight alpha
//! - `Alpha`: a single 8-bit alpha channel

use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::gl::{Size, TextureFormat};

/// Channel layout and alpha convention of an image
pub trait ImageKind {
    /// Bytes per pixel
    const CHANNELS: usize;
    /// Driver format used to read this kind back
    const FORMAT: TextureFormat;
}

/// Four-channel image kinds, viewable as `[u8; 4]` pixels
pub trait RgbaImageKind: ImageKind {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Premultiplied {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unassociated {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alpha {}

impl ImageKind for Premultiplied {
    const CHANNELS: usize = 4;
    const FORMAT: TextureFormat = TextureFormat::Rgba;
}

impl ImageKind for Unassociated {
    const CHANNELS: usize = 4;
    const FORMAT: TextureFormat = TextureFormat::Rgba;
}

impl ImageKind for Alpha {
    const CHANNELS: usize = 1;
    const FORMAT: TextureFormat = TextureFormat::Alpha;
}

impl RgbaImageKind for Premultiplied {}
impl RgbaImageKind for Unassociated {}

pub type PremultipliedImage = Image<Premultiplied>;
pub type UnassociatedImage = Image<Unassociated>;
pub type AlphaImage = Image<Alpha>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image<M: ImageKind> {
    size: Size,
    data: Vec<u8>,
    _kind: PhantomData<M>,
}

impl<M: ImageKind> Image<M> {
    /// Wrap `data`, which must hold exactly `size.area() * CHANNELS` bytes
    pub fn new(size: Size, data: Vec<u8>) -> Result<Self> {
        let expected = size.area() * M::CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidResource(format!(
                "image {}x{} needs {} bytes, got {}",
                size.width, size.height, expected, data.len()
            )));
        }
        Ok(Self { size, data, _kind: PhantomData })
    }

    /// Image with every byte set to zero (transparent black for RGBA kinds)
    pub fn zeroed(size: Size) -> Self {
        Self {
            size,
            data: vec![0; size.area() * M::CHANNELS],
            _kind: PhantomData,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.size.width as usize * M::CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Channels of the pixel at column `x`, row `y` (row 0 is the top)
    ///
    /// Panics when the coordinate lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(
            x < self.size.width && y < self.size.height,
            "pixel ({}, {}) outside {}x{} image",
            x, y, self.size.width, self.size.height
        );
        let start = y as usize * self.stride() + x as usize * M::CHANNELS;
        &self.data[start..start + M::CHANNELS]
    }

    /// Reverse the row order in place
    pub fn flip_vertical(&mut self) {
        let stride = self.stride();
        if stride == 0 {
            return;
        }
        let rows = self.size.height as usize;
        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;
            let (upper, lower) = self.data.split_at_mut(bottom * stride);
            upper[top * stride..(top + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }
    }
}

impl<M: RgbaImageKind> Image<M> {
    /// RGBA pixels in row-major order
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Multiply color channels by alpha
pub fn premultiply(image: UnassociatedImage) -> PremultipliedImage {
    let size = image.size;
    let mut data = image.data;
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
    Image { size, data, _kind: PhantomData }
}

/// Divide color channels by alpha; fully transparent pixels are left untouched
pub fn unpremultiply(image: PremultipliedImage) -> UnassociatedImage {
    let size = image.size;
    let mut data = image.data;
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((255 * *c as u16 + a / 2) / a).min(255) as u8;
        }
    }
    Image { size, data, _kind: PhantomData }
}

#[cfg(test)]
#[path = "image_tests.rs"]
mod tests;
