use crate::{
    foundation::{
        core::Rgba8,
        error::{ThumbError, ThumbResult},
    },
    text::{face::TextFace, fit::TextMeasure},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for shaping single-line text with registered [`TextFace`]s.
///
/// Parley contexts are not `Sync`, so each render builds its own engine.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Vec<RegisteredFace>,
}

/// Parley-side selectors that resolve to exactly the face the glyphs are drawn with.
#[derive(Clone, Debug)]
struct RegisteredFace {
    face_id: u64,
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    /// Register the face's font data; repeated calls for the same face are no-ops.
    ///
    /// Collections register every member, so the family and attributes of the member at
    /// [`TextFace::index`] are recorded to keep shaping on the drawn face.
    pub fn register(&mut self, face: &TextFace) -> ThumbResult<()> {
        if self.registered_for(face).is_some() {
            return Ok(());
        }
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.font_bytes().to_vec()),
            None,
        );
        let (family_id, info) = families
            .iter()
            .find_map(|(id, infos)| {
                infos
                    .iter()
                    .find(|info| info.index() == face.index())
                    .map(|info| (*id, info.clone()))
            })
            .or_else(|| {
                families
                    .first()
                    .and_then(|(id, infos)| infos.first().map(|info| (*id, info.clone())))
            })
            .ok_or_else(|| ThumbError::asset("font data registered no font families"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::asset("registered font family has no name"))?
            .to_string();
        self.registered.push(RegisteredFace {
            face_id: face.id(),
            family,
            weight: info.weight(),
            style: info.style(),
            width: info.width(),
        });
        Ok(())
    }

    fn registered_for(&self, face: &TextFace) -> Option<&RegisteredFace> {
        self.registered.iter().find(|r| r.face_id == face.id())
    }

    /// Shape `text` on one unbounded line.
    pub fn layout_line(
        &mut self,
        text: &str,
        face: &TextFace,
        brush: TextBrushRgba8,
    ) -> ThumbResult<parley::Layout<TextBrushRgba8>> {
        let selector = self
            .registered_for(face)
            .cloned()
            .ok_or_else(|| ThumbError::asset("text face was not registered with the engine"))?;
        Ok(self.build(text, &selector, face.size_px(), brush))
    }

    fn build(
        &mut self,
        text: &str,
        selector: &RegisteredFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(selector.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(selector.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(selector.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(selector.width));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Measuring view over one registered face, for [`crate::text::fit::fit`].
    pub fn measure_with<'a>(&'a mut self, face: &'a TextFace) -> ThumbResult<FaceMeasure<'a>> {
        self.register(face)?;
        let selector = self
            .registered_for(face)
            .cloned()
            .ok_or_else(|| ThumbError::asset("text face was not registered with the engine"))?;
        Ok(FaceMeasure {
            engine: self,
            selector,
            size_px: face.size_px(),
        })
    }
}

pub struct FaceMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    selector: RegisteredFace,
    size_px: f32,
}

impl TextMeasure for FaceMeasure<'_> {
    fn width(&mut self, text: &str) -> f32 {
        let layout = self.engine.build(
            text,
            &self.selector,
            self.size_px,
            TextBrushRgba8::default(),
        );
        layout.width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
