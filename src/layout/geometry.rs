use crate::foundation::{
    core::{Canvas, Point, Rect},
    error::{ThumbError, ThumbResult},
};

pub const PANEL_WIDTH: u32 = 763;
pub const PANEL_HEIGHT: u32 = 545;
pub const PANEL_TOP: u32 = 88;
pub const THUMB_WIDTH: u32 = 542;
pub const THUMB_HEIGHT: u32 = 273;
pub const ICONS_WIDTH: u32 = 415;
pub const ICONS_HEIGHT: u32 = 45;
pub const TITLE_MAX_WIDTH: f32 = 580.0;
pub const ELAPSED_LENGTH: f64 = 280.0;
pub const BAR_LENGTH: f64 = 480.0;

const THUMB_TOP_GAP: u32 = 36;
const TITLE_INSET: f64 = 9.0;
const TITLE_GAP: f64 = 10.0;
const LINE_STEP: f64 = 45.0;
const BAR_INSET: f64 = 20.0;
const LABEL_GAP: f64 = 15.0;
const END_LABEL_BACKOFF: f64 = 60.0;
const LIVE_LABEL_BACKOFF: f64 = 90.0;
const ICONS_GAP: f64 = 48.0;

/// Drawing parameters that are not positions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderTuning {
    pub blur_radius: u32,
    pub backdrop_brightness: f32,
    pub panel_alpha: u8,
    pub panel_radius: f64,
    pub thumb_radius: f64,
    pub title_size_px: f32,
    pub meta_size_px: f32,
    pub elapsed_width: f64,
    pub remaining_width: f64,
    pub scrubber_radius: f64,
}

impl Default for RenderTuning {
    fn default() -> Self {
        Self {
            blur_radius: 10,
            backdrop_brightness: 0.6,
            panel_alpha: 170,
            panel_radius: 50.0,
            thumb_radius: 20.0,
            title_size_px: 32.0,
            meta_size_px: 18.0,
            elapsed_width: 6.0,
            remaining_width: 5.0,
            scrubber_radius: 7.0,
        }
    }
}

impl RenderTuning {
    pub fn validate(&self) -> ThumbResult<()> {
        if !(0.0..=1.0).contains(&self.backdrop_brightness) {
            return Err(ThumbError::layout("backdrop_brightness must be in [0, 1]"));
        }
        for (name, v) in [
            ("title_size_px", self.title_size_px),
            ("meta_size_px", self.meta_size_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ThumbError::layout(format!("{name} must be finite and > 0")));
            }
        }
        for (name, v) in [
            ("panel_radius", self.panel_radius),
            ("thumb_radius", self.thumb_radius),
            ("elapsed_width", self.elapsed_width),
            ("remaining_width", self.remaining_width),
            ("scrubber_radius", self.scrubber_radius),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ThumbError::layout(format!("{name} must be finite and >= 0")));
            }
        }
        Ok(())
    }
}

/// Integer-aligned pixel box used for raster blits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBox {
    pub fn rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }
}

/// Progress bar: elapsed segment `start..join`, remaining segment `join..end`, scrubber on `join`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    pub start: Point,
    pub join: Point,
    pub end: Point,
}

impl ProgressBar {
    pub fn elapsed_rect(&self, width: f64) -> Rect {
        Rect::new(
            self.start.x,
            self.start.y - width / 2.0,
            self.join.x,
            self.start.y + width / 2.0,
        )
    }

    pub fn remaining_rect(&self, width: f64) -> Rect {
        Rect::new(
            self.join.x,
            self.join.y - width / 2.0,
            self.end.x,
            self.join.y + width / 2.0,
        )
    }

    pub fn scrubber_bounds(&self, radius: f64) -> Rect {
        Rect::new(
            self.join.x - radius,
            self.join.y - radius,
            self.join.x + radius,
            self.join.y + radius,
        )
    }
}

/// Where everything goes on the canvas. Computed once, immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutGeometry {
    pub canvas: Canvas,
    pub panel: PixelBox,
    pub thumbnail: PixelBox,
    pub title: Point,
    pub title_max_width: f32,
    pub meta: Point,
    pub bar: ProgressBar,
    pub time_label: Point,
    pub end_label: Point,
    pub live_label: Point,
    pub icons: PixelBox,
}

impl LayoutGeometry {
    pub fn for_canvas(canvas: Canvas) -> ThumbResult<Self> {
        Self::with_tuning(canvas, &RenderTuning::default())
    }

    /// Like [`Self::for_canvas`], also checking the stroke and text extents implied by `tuning`.
    pub fn with_tuning(canvas: Canvas, tuning: &RenderTuning) -> ThumbResult<Self> {
        tuning.validate()?;

        let panel_x = canvas
            .width
            .checked_sub(PANEL_WIDTH)
            .map(|slack| slack / 2)
            .ok_or_else(|| {
                ThumbError::layout(format!(
                    "canvas width {} is narrower than the {PANEL_WIDTH}px panel",
                    canvas.width
                ))
            })?;
        let panel = PixelBox {
            x: panel_x,
            y: PANEL_TOP,
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
        };
        let thumbnail = PixelBox {
            x: panel.x + (PANEL_WIDTH - THUMB_WIDTH) / 2,
            y: panel.y + THUMB_TOP_GAP,
            width: THUMB_WIDTH,
            height: THUMB_HEIGHT,
        };

        let thumb_rect = thumbnail.rect();
        let title = Point::new(thumb_rect.x0 + TITLE_INSET, thumb_rect.y1 + TITLE_GAP);
        let meta = Point::new(title.x, title.y + LINE_STEP);

        let bar_start = Point::new(thumb_rect.x0 + BAR_INSET, meta.y + LINE_STEP);
        let bar = ProgressBar {
            start: bar_start,
            join: Point::new(bar_start.x + ELAPSED_LENGTH, bar_start.y),
            end: Point::new(bar_start.x + BAR_LENGTH, bar_start.y),
        };

        let label_y = bar.start.y + LABEL_GAP;
        let time_label = Point::new(bar.start.x, label_y);
        let end_label = Point::new(bar.end.x - END_LABEL_BACKOFF, label_y);
        let live_label = Point::new(bar.end.x - LIVE_LABEL_BACKOFF, label_y);

        let icons = PixelBox {
            x: panel.x + (PANEL_WIDTH - ICONS_WIDTH) / 2,
            // Anchored off the bar, so truncate like every other pixel box.
            y: (bar.start.y + ICONS_GAP) as u32,
            width: ICONS_WIDTH,
            height: ICONS_HEIGHT,
        };

        let geometry = Self {
            canvas,
            panel,
            thumbnail,
            title,
            title_max_width: TITLE_MAX_WIDTH,
            meta,
            bar,
            time_label,
            end_label,
            live_label,
            icons,
        };

        for (name, bounds) in geometry.bounding_boxes(tuning) {
            if !canvas.contains(bounds) {
                return Err(ThumbError::layout(format!(
                    "{name} {bounds:?} falls outside the {}x{} canvas",
                    canvas.width, canvas.height
                )));
            }
        }
        Ok(geometry)
    }

    /// Conservative bounds of every drawn element, keyed by element name.
    pub fn bounding_boxes(&self, tuning: &RenderTuning) -> Vec<(&'static str, Rect)> {
        let title_h = f64::from(tuning.title_size_px) * 1.25;
        let meta_h = f64::from(tuning.meta_size_px) * 1.25;
        let max_w = f64::from(self.title_max_width);
        let text_box = |p: Point, w: f64, h: f64| Rect::new(p.x, p.y, p.x + w, p.y + h);

        vec![
            ("panel", self.panel.rect()),
            ("thumbnail", self.thumbnail.rect()),
            ("title", text_box(self.title, max_w, title_h)),
            ("meta", text_box(self.meta, max_w, meta_h)),
            ("elapsed", self.bar.elapsed_rect(tuning.elapsed_width)),
            ("remaining", self.bar.remaining_rect(tuning.remaining_width)),
            ("scrubber", self.bar.scrubber_bounds(tuning.scrubber_radius)),
            ("time_label", text_box(self.time_label, END_LABEL_BACKOFF, meta_h)),
            ("end_label", text_box(self.end_label, END_LABEL_BACKOFF, meta_h)),
            ("live_label", text_box(self.live_label, LIVE_LABEL_BACKOFF, meta_h)),
            ("icons", self.icons.rect()),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
