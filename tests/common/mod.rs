#![allow(dead_code)]

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use nowplaying_thumb::{ArtworkFetcher, ThumbError, ThumbResult, ThumbnailConfig, Track};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn artwork_png(w: u32, h: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn track(id: &str, thumbnail: &str) -> Track {
    Track {
        id: id.to_string(),
        title: Some("Never Gonna Give You Up".to_string()),
        thumbnail: thumbnail.to_string(),
        duration: Some("3:33".to_string()),
        view_count: Some("1.6B views".to_string()),
    }
}

pub fn config(dir: &Path) -> ThumbnailConfig {
    ThumbnailConfig {
        cache_dir: dir.join("cache"),
        fallback_path: dir.join("fallback.png"),
        ..ThumbnailConfig::default()
    }
}

/// Serves the same PNG for every URL and counts requests.
pub struct CountingFetcher {
    body: Vec<u8>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(body: Vec<u8>) -> Self {
        Self::with_delay(body, Duration::ZERO)
    }

    pub fn with_delay(body: Vec<u8>, delay: Duration) -> Self {
        Self {
            body,
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArtworkFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> ThumbResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tokio::fs::write(dest, &self.body).await?;
        Ok(())
    }
}

pub struct RefusingFetcher;

impl ArtworkFetcher for RefusingFetcher {
    async fn fetch(&self, url: &str, _dest: &Path) -> ThumbResult<()> {
        Err(ThumbError::network(format!("GET {url} returned 503")))
    }
}
