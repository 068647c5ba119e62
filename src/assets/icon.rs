use std::path::Path;

use crate::{
    assets::decode::{PreparedImage, decode_rgba8, resize_rgba8},
    foundation::error::{ThumbError, ThumbResult},
};

/// Load the optional icon strip at `path`, scaled to `width`×`height` and recolored to a black
/// silhouette that keeps the source alpha.
///
/// Returns `None` when the file does not exist or cannot be decoded; the strip is decorative, so
/// callers skip the overlay rather than fail the render.
pub fn load_icon_silhouette(path: &Path, width: u32, height: u32) -> Option<PreparedImage> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "icon strip not present; skipping overlay");
        return None;
    }
    match rasterize_icon(path, width, height) {
        Ok(mut icon) => {
            silhouette_in_place(&mut icon.rgba8_premul);
            Some(icon)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "icon strip unreadable; skipping overlay");
            None
        }
    }
}

fn rasterize_icon(path: &Path, width: u32, height: u32) -> ThumbResult<PreparedImage> {
    let bytes = std::fs::read(path)?;
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(&bytes, &opts)
            .map_err(|e| ThumbError::asset(format!("parse svg icon: {e}")))?;
        let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
        return Ok(PreparedImage {
            width,
            height,
            rgba8_premul,
        });
    }

    let img = decode_rgba8(&bytes)?;
    Ok(PreparedImage::from_straight(resize_rgba8(&img, width, height)))
}

fn rasterize_svg_to_premul_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> ThumbResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ThumbError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Force every pixel to black, keeping coverage. In premultiplied form that is `[0, 0, 0, a]`.
pub fn silhouette_in_place(rgba8_premul: &mut [u8]) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        px[0] = 0;
        px[1] = 0;
        px[2] = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icon.rs"]
mod tests;
