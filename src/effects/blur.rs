use rayon::prelude::*;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Separable box blur over premultiplied RGBA8, edges clamped (PIL `BoxBlur` semantics).
///
/// Each output pixel is the mean of the `(2 * radius + 1)` window along x, then along y.
pub fn box_blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
) -> ThumbResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ThumbError::layout("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ThumbError::layout(
            "box_blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, radius);
    vertical_pass(&tmp, &mut out, width, height, radius);
    Ok(out)
}

// Sliding-window sum along each row.
fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, radius: u32) {
    let w = width as i64;
    let r = radius as i64;
    let n = (2 * r + 1) as u64;
    let row_bytes = (width as usize) * 4;

    dst.par_chunks_mut(row_bytes)
        .zip(src.par_chunks(row_bytes))
        .for_each(|(out_row, in_row)| {
            let px = |x: i64| -> usize { (x.clamp(0, w - 1) as usize) * 4 };
            let mut acc = [0u64; 4];
            for dx in -r..=r {
                let i = px(dx);
                for c in 0..4 {
                    acc[c] += u64::from(in_row[i + c]);
                }
            }
            for x in 0..w {
                let o = (x as usize) * 4;
                for c in 0..4 {
                    out_row[o + c] = mean_u8(acc[c], n);
                }
                let leaving = px(x - r);
                let entering = px(x + r + 1);
                for c in 0..4 {
                    acc[c] = acc[c] + u64::from(in_row[entering + c]) - u64::from(in_row[leaving + c]);
                }
            }
        });
}

// Direct window per output row; rows are independent so they fan out over rayon.
fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let h = height as i64;
    let r = radius as i64;
    let n = (2 * r + 1) as u64;
    let row_bytes = (width as usize) * 4;

    dst.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as i64;
            let mut acc = vec![0u64; row_bytes];
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, h - 1) as usize;
                let in_row = &src[sy * row_bytes..(sy + 1) * row_bytes];
                for (a, &v) in acc.iter_mut().zip(in_row) {
                    *a += u64::from(v);
                }
            }
            for (o, a) in out_row.iter_mut().zip(acc) {
                *o = mean_u8(a, n);
            }
        });
}

fn mean_u8(sum: u64, n: u64) -> u8 {
    ((sum + n / 2) / n).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
