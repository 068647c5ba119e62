use crate::{
    assets::{
        decode::{PreparedImage, decode_rgba8, encode_png_premul, resize_rgba8},
        icon::load_icon_silhouette,
    },
    config::ThumbnailConfig,
    effects::{
        blur::box_blur_rgba8_premul,
        composite::{
            Region, blend_region_masked, crop, over_in_place, over_region,
            scale_brightness_in_place,
        },
        mask::{replace_alpha_in_place, rounded_rect_mask},
    },
    foundation::{
        core::{Canvas, Point, Rgba8, Rgba8Premul},
        error::{ThumbError, ThumbResult},
    },
    layout::geometry::{LayoutGeometry, PixelBox, RenderTuning},
    model::track::{EndLabel, RenderRequest},
    render::{backend::RenderBackend, overlay::OverlayPainter},
    text::{
        engine::{TextBrushRgba8, TextLayoutEngine},
        face::{FaceResolver, TextFace},
        fit::fit,
    },
};

const START_LABEL: &str = "00:00";

/// Canvas-sized premultiplied RGBA8 buffer. One per render, never shared.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

impl Frame {
    fn over(&mut self, src: &[u8], at: PixelBox) -> ThumbResult<()> {
        over_region(
            &mut self.rgba8_premul,
            self.width,
            self.height,
            src,
            region(at),
        )
    }

    pub fn into_png(self) -> ThumbResult<Vec<u8>> {
        encode_png_premul(self.width, self.height, self.rgba8_premul)
    }
}

fn region(b: PixelBox) -> Region {
    Region {
        x: b.x,
        y: b.y,
        width: b.width,
        height: b.height,
    }
}

/// Stateless-per-call image compositor. Geometry, faces, masks, and the icon strip are resolved
/// once at construction and shared by every render.
pub struct Compositor {
    geometry: LayoutGeometry,
    tuning: RenderTuning,
    source_label: String,
    title_face: Option<TextFace>,
    regular_face: Option<TextFace>,
    icons: Option<PreparedImage>,
    panel_mask: Vec<u8>,
    thumb_mask: Vec<u8>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("canvas", &self.geometry.canvas)
            .field("title_face", &self.title_face)
            .field("regular_face", &self.regular_face)
            .field("icons", &self.icons.is_some())
            .finish()
    }
}

impl Compositor {
    /// Resolve fonts (configured file, then system sans-serif) and build the compositor.
    ///
    /// The title falls back to a bold system face.
    pub fn new(config: &ThumbnailConfig) -> ThumbResult<Self> {
        let mut resolver = FaceResolver::new();
        let title_face = resolver.resolve_with_weight(
            config.title_font_path.as_deref(),
            config.tuning.title_size_px,
            usvg::fontdb::Weight::BOLD,
        );
        let regular_face = resolver.resolve(
            config.regular_font_path.as_deref(),
            config.tuning.meta_size_px,
        );
        Self::with_faces(config, title_face, regular_face)
    }

    /// Build with explicit faces; a `None` face skips the text drawn with it.
    pub fn with_faces(
        config: &ThumbnailConfig,
        title_face: Option<TextFace>,
        regular_face: Option<TextFace>,
    ) -> ThumbResult<Self> {
        let geometry = LayoutGeometry::with_tuning(config.canvas, &config.tuning)?;
        if title_face.is_none() || regular_face.is_none() {
            tracing::warn!(
                title = title_face.is_some(),
                regular = regular_face.is_some(),
                "no usable font for some text; those overlays will be skipped"
            );
        }

        let panel_mask = rounded_rect_mask(
            geometry.panel.width,
            geometry.panel.height,
            config.tuning.panel_radius,
        )?;
        let thumb_mask = rounded_rect_mask(
            geometry.thumbnail.width,
            geometry.thumbnail.height,
            config.tuning.thumb_radius,
        )?;
        let icons = config.icon_path.as_deref().and_then(|p| {
            load_icon_silhouette(p, geometry.icons.width, geometry.icons.height)
        });

        Ok(Self {
            geometry,
            tuning: config.tuning.clone(),
            source_label: config.source_label.clone(),
            title_face,
            regular_face,
            icons,
            panel_mask,
            thumb_mask,
        })
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    /// Composite one thumbnail and return it PNG-encoded. Never touches the filesystem.
    #[tracing::instrument(skip(self, request, artwork), fields(artwork_len = artwork.len()))]
    pub fn compose(&self, request: &RenderRequest, artwork: &[u8]) -> ThumbResult<Vec<u8>> {
        if request.canvas != self.geometry.canvas {
            return Err(ThumbError::layout(format!(
                "request canvas {:?} does not match compositor canvas {:?}",
                request.canvas, self.geometry.canvas
            )));
        }
        let Canvas { width, height } = request.canvas;

        let art = decode_rgba8(artwork)?;
        let base = PreparedImage::from_straight(resize_rgba8(&art, width, height));

        let mut frame = self.backdrop(&base)?;
        self.frost_panel(&mut frame)?;

        let g = &self.geometry;
        let mut thumb = resize_rgba8(&art, g.thumbnail.width, g.thumbnail.height);
        replace_alpha_in_place(&mut thumb, &self.thumb_mask)?;
        let thumb = PreparedImage::from_straight(thumb);
        frame.over(&thumb.rgba8_premul, g.thumbnail)?;

        let overlay = self.paint_overlay(request)?;
        over_in_place(&mut frame.rgba8_premul, &overlay, 1.0)?;

        if let Some(icons) = &self.icons {
            frame.over(&icons.rgba8_premul, g.icons)?;
        }

        frame.into_png()
    }

    fn backdrop(&self, base: &PreparedImage) -> ThumbResult<Frame> {
        let mut rgba8_premul = box_blur_rgba8_premul(
            &base.rgba8_premul,
            base.width,
            base.height,
            self.tuning.blur_radius,
        )?;
        scale_brightness_in_place(&mut rgba8_premul, self.tuning.backdrop_brightness);
        Ok(Frame {
            width: base.width,
            height: base.height,
            rgba8_premul,
        })
    }

    fn frost_panel(&self, frame: &mut Frame) -> ThumbResult<()> {
        let panel = region(self.geometry.panel);
        let mut frosted = crop(&frame.rgba8_premul, frame.width, frame.height, panel)?;
        let white = Rgba8Premul::from_straight_rgba(255, 255, 255, self.tuning.panel_alpha).to_array();
        let layer: Vec<u8> = white
            .iter()
            .copied()
            .cycle()
            .take(frosted.len())
            .collect();
        over_in_place(&mut frosted, &layer, 1.0)?;
        blend_region_masked(
            &mut frame.rgba8_premul,
            frame.width,
            frame.height,
            &frosted,
            &self.panel_mask,
            panel,
        )
    }

    fn paint_overlay(&self, request: &RenderRequest) -> ThumbResult<Vec<u8>> {
        let g = &self.geometry;
        let t = &self.tuning;
        let mut painter = OverlayPainter::new(g.canvas.width, g.canvas.height)?;
        let mut engine = TextLayoutEngine::new();

        if let Some(face) = &self.title_face {
            let title = {
                let mut measure = engine.measure_with(face)?;
                fit(&request.title, &mut measure, g.title_max_width)
            };
            draw_line(&mut painter, &mut engine, face, &title, Rgba8::BLACK, g.title)?;
        }

        painter.fill_rect(g.bar.elapsed_rect(t.elapsed_width), Rgba8::RED);
        painter.fill_rect(g.bar.remaining_rect(t.remaining_width), Rgba8::GRAY);
        painter.fill_circle(g.bar.join, t.scrubber_radius, Rgba8::RED);

        if let Some(face) = &self.regular_face {
            let meta = request.meta_line(&self.source_label);
            draw_line(&mut painter, &mut engine, face, &meta, Rgba8::BLACK, g.meta)?;
            draw_line(&mut painter, &mut engine, face, START_LABEL, Rgba8::BLACK, g.time_label)?;
            let (color, anchor) = match &request.end_label {
                EndLabel::Live => (Rgba8::RED, g.live_label),
                EndLabel::Duration(_) => (Rgba8::BLACK, g.end_label),
            };
            draw_line(&mut painter, &mut engine, face, request.end_label.text(), color, anchor)?;
        }

        Ok(painter.finish())
    }
}

fn draw_line(
    painter: &mut OverlayPainter,
    engine: &mut TextLayoutEngine,
    face: &TextFace,
    text: &str,
    color: Rgba8,
    origin: Point,
) -> ThumbResult<()> {
    engine.register(face)?;
    let layout = engine.layout_line(text, face, TextBrushRgba8::from(color))?;
    painter.draw_text(&layout, face.font(), origin);
    Ok(())
}

impl RenderBackend for Compositor {
    fn render_png(&self, request: &RenderRequest, artwork: &[u8]) -> ThumbResult<Vec<u8>> {
        self.compose(request, artwork)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
