use std::{path::PathBuf, time::Duration};

use anyhow::Context;

use crate::{
    foundation::{core::Canvas, error::ThumbResult},
    layout::geometry::RenderTuning,
};

/// Everything a [`crate::ThumbnailPipeline`] needs, loadable from JSON.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Directory of persisted `<id>_<version>.png` files. Scratch downloads live in `scratch/`
    /// underneath it.
    pub cache_dir: PathBuf,
    /// Returned whenever a render fails. Assumed to exist.
    pub fallback_path: PathBuf,
    /// Optional icon strip (PNG or SVG). Absence is normal.
    pub icon_path: Option<PathBuf>,
    pub title_font_path: Option<PathBuf>,
    pub regular_font_path: Option<PathBuf>,
    pub canvas: Canvas,
    /// Bumping this invalidates every cached image.
    pub layout_version: String,
    /// Left half of the metadata line.
    pub source_label: String,
    pub fetch_timeout_secs: u64,
    pub tuning: RenderTuning,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            fallback_path: PathBuf::from("assets/fallback.png"),
            icon_path: None,
            title_font_path: None,
            regular_font_path: None,
            canvas: Canvas::default(),
            layout_version: "v4".to_string(),
            source_label: "YouTube".to_string(),
            fetch_timeout_secs: 10,
            tuning: RenderTuning::default(),
        }
    }
}

impl ThumbnailConfig {
    pub fn from_json_str(s: &str) -> ThumbResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse thumbnail config JSON")?;
        Ok(cfg)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.cache_dir.join("scratch")
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
