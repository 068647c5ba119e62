use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = box_blur_rgba8_premul(&src, 1, 2, 0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = box_blur_rgba8_premul(&src, w, h, 10).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    let err = box_blur_rgba8_premul(&[0u8; 12], 2, 2, 1).unwrap_err();
    assert_eq!(err.kind(), "layout");
}

#[test]
fn blur_spreads_single_pixel_uniformly_over_window() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[225, 225, 225, 225]);

    let out = box_blur_rgba8_premul(&src, w, h, 1).unwrap();

    // 3x3 window: 225 / 9 = 25 everywhere inside it, zero outside.
    for y in 0..h {
        for x in 0..w {
            let a = out[((y * w + x) * 4 + 3) as usize];
            let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
            assert_eq!(a, if inside { 25 } else { 0 }, "pixel ({x},{y})");
        }
    }
}

#[test]
fn blur_clamps_edges_instead_of_darkening() {
    // A single opaque row stays opaque at the borders because edge pixels are repeated.
    let src = [0u8, 0, 0, 255].repeat(6);
    let out = box_blur_rgba8_premul(&src, 6, 1, 2).unwrap();
    assert!(out.chunks_exact(4).all(|p| p[3] == 255));
}
