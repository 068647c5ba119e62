use kurbo::Shape;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Rasterize an anti-aliased rounded rectangle covering a `width`×`height` box into an 8-bit
/// coverage mask (row-major, one byte per pixel).
pub fn rounded_rect_mask(width: u32, height: u32, radius: f64) -> ThumbResult<Vec<u8>> {
    let width_u16: u16 = width
        .try_into()
        .map_err(|_| ThumbError::layout("mask width exceeds u16"))?;
    let height_u16: u16 = height
        .try_into()
        .map_err(|_| ThumbError::layout("mask height exceeds u16"))?;
    if width_u16 == 0 || height_u16 == 0 {
        return Err(ThumbError::layout("mask must be non-empty"));
    }

    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

    let rr = kurbo::RoundedRect::new(0.0, 0.0, f64::from(width), f64::from(height), radius.max(0.0));
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        p.push(el);
    }
    ctx.fill_path(&p);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

/// Overwrite the alpha channel of a straight (non-premultiplied) RGBA8 buffer with `mask`.
pub fn replace_alpha_in_place(rgba8_straight: &mut [u8], mask: &[u8]) -> ThumbResult<()> {
    if rgba8_straight.len() != mask.len() * 4 {
        return Err(ThumbError::layout("alpha mask does not match image size"));
    }
    for (px, &m) in rgba8_straight.chunks_exact_mut(4).zip(mask) {
        px[3] = m;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mask.rs"]
mod tests;
