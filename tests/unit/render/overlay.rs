use super::*;

fn px(buf: &[u8], w: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * w + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn untouched_overlay_is_transparent() {
    let out = OverlayPainter::new(16, 8).unwrap().finish();
    assert_eq!(out.len(), 16 * 8 * 4);
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn rect_and_circle_land_where_asked() {
    let (w, h) = (64u32, 32u32);
    let mut painter = OverlayPainter::new(w, h).unwrap();
    painter.fill_rect(Rect::new(0.0, 10.0, 32.0, 16.0), Rgba8::RED);
    painter.fill_rect(Rect::new(32.0, 10.0, 64.0, 16.0), Rgba8::GRAY);
    painter.fill_circle(Point::new(48.0, 26.0), 4.0, Rgba8::BLACK);
    let out = painter.finish();

    assert_eq!(px(&out, w, 10, 12), [255, 0, 0, 255]);
    assert_eq!(px(&out, w, 50, 12), [128, 128, 128, 255]);
    assert_eq!(px(&out, w, 48, 26), [0, 0, 0, 255]);
    assert_eq!(px(&out, w, 10, 2), [0, 0, 0, 0]);
    assert_eq!(px(&out, w, 40, 31), [0, 0, 0, 0]);
}

#[test]
fn oversized_overlay_is_rejected() {
    assert!(OverlayPainter::new(70_000, 10).is_err());
    assert!(OverlayPainter::new(10, 0).is_err());
}

#[test]
fn glyphs_advance_across_the_line_from_the_origin() {
    use crate::text::{
        engine::{TextBrushRgba8, TextLayoutEngine},
        face::FaceResolver,
    };

    let Some(face) = FaceResolver::new().resolve(None, 32.0) else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    engine.register(&face).unwrap();
    let layout = engine
        .layout_line("WWWWWWWWWWWW", &face, TextBrushRgba8::from(Rgba8::BLACK))
        .unwrap();

    let (w, h) = (800u32, 200u32);
    let mut painter = OverlayPainter::new(w, h).unwrap();
    painter.draw_text(&layout, face.font(), Point::new(100.0, 100.0));
    let out = painter.finish();

    let inked: Vec<(u32, u32)> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| px(&out, w, x, y)[3] > 64)
        .collect();
    assert!(!inked.is_empty());
    let min_x = inked.iter().map(|p| p.0).min().unwrap();
    let max_x = inked.iter().map(|p| p.0).max().unwrap();
    let min_y = inked.iter().map(|p| p.1).min().unwrap();

    let ink_w = (max_x - min_x + 1) as f32;
    let expected = layout.width();
    assert!(min_y >= 100, "ink starts at y={min_y}, above the origin");
    assert!(min_x >= 99, "ink starts at x={min_x}, left of the origin");
    assert!(ink_w >= expected * 0.8, "ink {ink_w} vs layout {expected}");
    assert!(ink_w <= expected + 4.0, "ink {ink_w} vs layout {expected}");
}
