use super::*;

// ============================================================================
// Size
// ============================================================================

#[test]
fn test_size_is_empty() {
    assert!(Size::new(0, 0).is_empty());
    assert!(Size::new(0, 256).is_empty());
    assert!(Size::new(256, 0).is_empty());
    assert!(!Size::new(1, 1).is_empty());
}

#[test]
fn test_size_area() {
    assert_eq!(Size::new(256, 128).area(), 32768);
    assert_eq!(Size::default().area(), 0);
}

#[test]
fn test_size_glam_conversion() {
    let size: Size = glam::UVec2::new(640, 480).into();
    assert_eq!(size, Size::new(640, 480));

    let v: glam::UVec2 = size.into();
    assert_eq!(v, glam::UVec2::new(640, 480));
}

// ============================================================================
// Formats
// ============================================================================

#[test]
fn test_texture_format_bytes_per_pixel() {
    assert_eq!(TextureFormat::Rgba.bytes_per_pixel(), 4);
    assert_eq!(TextureFormat::Alpha.bytes_per_pixel(), 1);
}

#[test]
fn test_sampling_defaults() {
    assert_eq!(TextureFilter::default(), TextureFilter::Nearest);
    assert_eq!(TextureWrap::default(), TextureWrap::Clamp);
}

// ============================================================================
// ClearMask
// ============================================================================

#[test]
fn test_clear_mask_combination() {
    let mask = ClearMask::COLOR | ClearMask::DEPTH;
    assert!(mask.contains(ClearMask::COLOR));
    assert!(mask.contains(ClearMask::DEPTH));
    assert!(!mask.contains(ClearMask::STENCIL));
    assert!(ClearMask::empty().is_empty());
}
