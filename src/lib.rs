//! `nowplaying-thumb` renders one composited "now playing" PNG per track.
//!
//! A render turns remote cover art into a 1280×720 card: blurred and darkened backdrop, a frosted
//! rounded panel, the artwork with rounded corners, a trimmed title, a `source | views` line, a
//! progress bar with time labels, and an optional icon strip.
//!
//! # Pipeline overview
//!
//! 1. **Check cache**: `(track id, layout version) -> CacheKey`; a hit returns the stored path
//! 2. **Fetch**: artwork is downloaded into a per-render scratch file ([`ArtworkFetcher`])
//! 3. **Compose**: [`Compositor`] produces PNG bytes on the blocking pool, no file IO
//! 4. **Persist**: the PNG is written once through a [`CacheStore`]
//!
//! Any failure along the way yields the configured fallback image path instead; see
//! [`ThumbnailPipeline::generate`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Write-once cache**: an entry is never overwritten; bump the layout version to re-render.
//! - **Premultiplied RGBA8** inside the compositor; the PNG is un-premultiplied on encode.
#![forbid(unsafe_code)]

mod assets;
mod cache;
mod config;
mod effects;
mod foundation;
mod layout;
mod model;
mod pipeline;
mod render;
mod text;

pub use assets::decode::PreparedImage;
pub use assets::fetch::{ArtworkFetcher, HttpFetcher, part_path};
pub use cache::store::{CacheKey, CacheStore, FsCacheStore, MemoryCacheStore};
pub use config::ThumbnailConfig;
pub use foundation::core::{Canvas, Point, Rect, Rgba8};
pub use foundation::error::{ThumbError, ThumbResult};
pub use layout::geometry::{LayoutGeometry, PixelBox, ProgressBar, RenderTuning};
pub use model::track::{
    EndLabel, RenderRequest, Track, UNKNOWN_DURATION, UNKNOWN_VIEWS, UNSUPPORTED_TITLE,
    classify_duration, normalize_title,
};
pub use pipeline::orchestrator::{Stage, ThumbnailPipeline};
pub use render::backend::RenderBackend;
pub use render::compositor::Compositor;
pub use text::engine::{TextBrushRgba8, TextLayoutEngine};
pub use text::face::{FaceResolver, FaceSource, TextFace};
pub use text::fit::{ELLIPSIS, TextMeasure, fit};
