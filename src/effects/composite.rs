use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Linear mix of two premultiplied pixels; `t = 0` is `a`, `t = 1` is `b`.
pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255(u16::from(a[i]), it);
        let bv = mul_div255(u16::from(b[i]), tt);
        out[i] = add_sat_u8(av, bv);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ThumbResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ThumbError::layout(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Placement of a `width`×`height` sub-rectangle inside a larger premultiplied buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    fn check_inside(self, dst_w: u32, dst_h: u32, dst_len: usize) -> ThumbResult<()> {
        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= dst_w);
        let fits_y = self.y.checked_add(self.height).is_some_and(|b| b <= dst_h);
        if !fits_x || !fits_y {
            return Err(ThumbError::layout(format!(
                "region {}x{}+{}+{} exceeds {dst_w}x{dst_h} surface",
                self.width, self.height, self.x, self.y
            )));
        }
        if dst_len != (dst_w as usize) * (dst_h as usize) * 4 {
            return Err(ThumbError::layout("surface byte length mismatch"));
        }
        Ok(())
    }

    fn row_range(self, dst_w: u32, row: u32) -> std::ops::Range<usize> {
        let start = (((self.y + row) as usize) * (dst_w as usize) + self.x as usize) * 4;
        start..start + (self.width as usize) * 4
    }
}

/// Copy the pixels under `region` out of `src` into a tightly packed buffer.
pub fn crop(src: &[u8], src_w: u32, src_h: u32, region: Region) -> ThumbResult<Vec<u8>> {
    region.check_inside(src_w, src_h, src.len())?;
    let mut out = Vec::with_capacity((region.width as usize) * (region.height as usize) * 4);
    for row in 0..region.height {
        out.extend_from_slice(&src[region.row_range(src_w, row)]);
    }
    Ok(out)
}

/// Source-over a tightly packed premultiplied `src` onto `dst` at `region`.
pub fn over_region(dst: &mut [u8], dst_w: u32, dst_h: u32, src: &[u8], region: Region) -> ThumbResult<()> {
    region.check_inside(dst_w, dst_h, dst.len())?;
    let row_bytes = (region.width as usize) * 4;
    if src.len() != row_bytes * (region.height as usize) {
        return Err(ThumbError::layout("over_region source size mismatch"));
    }
    for (row, s) in (0..region.height).zip(src.chunks_exact(row_bytes)) {
        over_in_place(&mut dst[region.row_range(dst_w, row)], s, 1.0)?;
    }
    Ok(())
}

/// Blend `src` into `dst` at `region`, weighting each pixel by the 8-bit `mask` coverage.
///
/// Where the mask is 0 the destination is untouched; where it is 255 the source replaces it.
pub fn blend_region_masked(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    mask: &[u8],
    region: Region,
) -> ThumbResult<()> {
    region.check_inside(dst_w, dst_h, dst.len())?;
    let px_count = (region.width as usize) * (region.height as usize);
    if src.len() != px_count * 4 || mask.len() != px_count {
        return Err(ThumbError::layout(
            "blend_region_masked expects src/mask matching the region",
        ));
    }
    let w = region.width as usize;
    for row in 0..region.height {
        let d_row = &mut dst[region.row_range(dst_w, row)];
        let off = (row as usize) * w;
        for (i, d) in d_row.chunks_exact_mut(4).enumerate() {
            let m = mask[off + i];
            if m == 0 {
                continue;
            }
            let s = &src[(off + i) * 4..(off + i) * 4 + 4];
            let out = crossfade(
                [d[0], d[1], d[2], d[3]],
                [s[0], s[1], s[2], s[3]],
                f32::from(m) / 255.0,
            );
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Multiply the color channels by `factor`, leaving alpha alone (PIL's brightness enhance).
pub fn scale_brightness_in_place(buf: &mut [u8], factor: f32) {
    let f = ((factor.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    for px in buf.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), f);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
