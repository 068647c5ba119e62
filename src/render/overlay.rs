use kurbo::Shape;

use crate::{
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{ThumbError, ThumbResult},
    },
    text::engine::TextBrushRgba8,
};

/// Vector layer (bars, scrubber, text) rasterized with `vello_cpu` on a transparent surface the
/// size of the canvas, then composited over the frame in one pass.
pub struct OverlayPainter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl OverlayPainter {
    pub fn new(width: u32, height: u32) -> ThumbResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| ThumbError::layout("overlay width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| ThumbError::layout("overlay height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ThumbError::layout("overlay must be non-empty"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_color(color);
        let circle = kurbo::Circle::new(center, radius);
        let mut p = vello_cpu::kurbo::BezPath::new();
        for el in circle.path_elements(0.1) {
            p.push(el);
        }
        self.ctx.fill_path(&p);
    }

    /// Draw a shaped single-line layout with the top of its line box at `origin`.
    pub fn draw_text(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        font: &vello_cpu::peniko::FontData,
        origin: Point,
    ) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Absolute positions within the layout, baseline included.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far into premultiplied RGBA8 bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
