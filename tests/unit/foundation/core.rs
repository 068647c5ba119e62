use super::*;

#[test]
fn default_canvas_is_720p() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1280, 720));
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 1280.0, 720.0));
}

#[test]
fn canvas_rejects_degenerate_sizes() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert!(Canvas::new(640, 360).is_ok());
}

#[test]
fn canvas_contains_edges_inclusive() {
    let c = Canvas::new(100, 50).unwrap();
    assert!(c.contains(Rect::new(0.0, 0.0, 100.0, 50.0)));
    assert!(c.contains(Rect::new(10.0, 10.0, 10.0, 10.0)));
    assert!(!c.contains(Rect::new(-1.0, 0.0, 10.0, 10.0)));
    assert!(!c.contains(Rect::new(0.0, 0.0, 100.5, 10.0)));
}

#[test]
fn premul_from_straight_rounds() {
    let p = Rgba8Premul::from_straight_rgba(255, 255, 255, 170);
    assert_eq!(p.to_array(), [170, 170, 170, 170]);
    let p = Rgba8Premul::from_straight_rgba(100, 0, 200, 0);
    assert_eq!(p.to_array(), [0, 0, 0, 0]);
}
