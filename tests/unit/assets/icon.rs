use super::*;

#[test]
fn missing_icon_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_icon_silhouette(&dir.path().join("play_icons.png"), 10, 4).is_none());
}

#[test]
fn undecodable_icon_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("play_icons.png");
    std::fs::write(&path, b"not a png").unwrap();
    assert!(load_icon_silhouette(&path, 10, 4).is_none());
}

#[test]
fn png_icon_becomes_black_with_alpha_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("play_icons.png");
    let mut img = image::RgbaImage::from_pixel(8, 4, image::Rgba([250, 40, 40, 0]));
    for x in 0..4 {
        for y in 0..4 {
            img.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
        }
    }
    img.save(&path).unwrap();

    let icon = load_icon_silhouette(&path, 8, 4).unwrap();
    assert_eq!((icon.width, icon.height), (8, 4));
    let px = |x: usize, y: usize| &icon.rgba8_premul[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
    assert_eq!(px(1, 1), &[0, 0, 0, 255]);
    assert_eq!(px(7, 1), &[0, 0, 0, 0]);
}

#[test]
fn svg_icon_is_rasterized_at_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("play_icons.svg");
    std::fs::write(
        &path,
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#ff0000"/></svg>"##,
    )
    .unwrap();

    let icon = load_icon_silhouette(&path, 40, 20).unwrap();
    assert_eq!((icon.width, icon.height), (40, 20));
    let center = &icon.rgba8_premul[(10 * 40 + 20) * 4..(10 * 40 + 20) * 4 + 4];
    assert_eq!(center, &[0, 0, 0, 255]);
}
