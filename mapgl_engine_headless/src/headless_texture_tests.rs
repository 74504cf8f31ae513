/// Unit tests for headless pixel storage

use super::*;

#[test]
fn test_new_texture_is_transparent_black() {
    let texture = HeadlessTexture::new(Size::new(3, 2), TextureFormat::Rgba);
    assert_eq!(texture.byte_size(), 24);
    assert!(texture.read(Size::new(3, 2), TextureFormat::Rgba).iter().all(|b| *b == 0));
}

#[test]
fn test_color_to_bytes_rounds_and_clamps() {
    assert_eq!(color_to_bytes(Vec4::new(1.0, 0.5, 0.0, 1.0)), [255, 128, 0, 255]);
    assert_eq!(color_to_bytes(Vec4::new(2.0, -1.0, 0.2, 0.0)), [255, 0, 51, 0]);
}

#[test]
fn test_clipped_rect() {
    let size = Size::new(10, 10);
    assert_eq!(
        PixelRect::clipped(Rect2D::new(-2, 3, 5, 20), size),
        Some(PixelRect { x0: 0, y0: 3, x1: 3, y1: 10 })
    );
    assert_eq!(PixelRect::clipped(Rect2D::new(10, 0, 4, 4), size), None);
    assert_eq!(PixelRect::clipped(Rect2D::new(2, 2, 0, 4), size), None);
}

#[test]
fn test_fill_region_bottom_up() {
    let mut texture = HeadlessTexture::new(Size::new(2, 2), TextureFormat::Rgba);
    texture.fill(PixelRect { x0: 1, y0: 0, x1: 2, y1: 1 }, [9, 8, 7, 6]);

    let data = texture.read(Size::new(2, 2), TextureFormat::Rgba);
    // Row 0 is the bottom row
    assert_eq!(&data[0..8], &[0, 0, 0, 0, 9, 8, 7, 6]);
    assert_eq!(&data[8..16], &[0; 8]);
}

#[test]
fn test_read_sub_region_and_conversions() {
    let mut texture = HeadlessTexture::new(Size::new(4, 4), TextureFormat::Rgba);
    texture.fill(PixelRect::full(Size::new(4, 4)), [1, 2, 3, 200]);

    let rgba = texture.read(Size::new(2, 1), TextureFormat::Rgba);
    assert_eq!(rgba, vec![1, 2, 3, 200, 1, 2, 3, 200]);

    let alpha = texture.read(Size::new(2, 2), TextureFormat::Alpha);
    assert_eq!(alpha, vec![200; 4]);
}

#[test]
fn test_alpha_texture() {
    let mut texture = HeadlessTexture::new(Size::new(2, 1), TextureFormat::Alpha);
    assert_eq!(texture.byte_size(), 2);
    texture.fill(PixelRect::full(Size::new(2, 1)), [10, 20, 30, 40]);

    assert_eq!(texture.read(Size::new(2, 1), TextureFormat::Alpha), vec![40, 40]);
    assert_eq!(texture.read(Size::new(1, 1), TextureFormat::Rgba), vec![0, 0, 0, 40]);
}
