use std::io::Cursor;

use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::{ThumbError, ThumbResult};

#[derive(Clone, Debug)]
/// Raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

impl PreparedImage {
    pub fn from_straight(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }
}

/// Decode any format the `image` crate recognises into straight RGBA8.
pub fn decode_rgba8(bytes: &[u8]) -> ThumbResult<RgbaImage> {
    if bytes.is_empty() {
        return Err(ThumbError::decode("image payload is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ThumbError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Bicubic resize, matching the default resampling of the renders this crate reproduces.
pub fn resize_rgba8(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, FilterType::CatmullRom)
}

/// Encode a premultiplied RGBA8 surface as PNG bytes.
pub fn encode_png_premul(width: u32, height: u32, mut rgba8_premul: Vec<u8>) -> ThumbResult<Vec<u8>> {
    unpremultiply_rgba8_in_place(&mut rgba8_premul);
    let img = RgbaImage::from_raw(width, height, rgba8_premul)
        .ok_or_else(|| ThumbError::layout("png surface size mismatch"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
