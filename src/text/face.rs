use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::{
    error::{ThumbError, ThumbResult},
    math::Fnv1a64,
};

/// Where a [`TextFace`]'s font data came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceSource {
    /// Font file configured by the caller.
    Custom(PathBuf),
    /// Sans-serif face picked from the system font database.
    SystemDefault,
}

/// A font at a fixed pixel size, resolved once and reused for every render.
#[derive(Clone)]
pub struct TextFace {
    source: FaceSource,
    size_px: f32,
    id: u64,
    index: u32,
    weight: usvg::fontdb::Weight,
    font_bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFace")
            .field("source", &self.source)
            .field("size_px", &self.size_px)
            .field("index", &self.index)
            .field("weight", &self.weight.0)
            .field("font_bytes_len", &self.font_bytes.len())
            .finish()
    }
}

impl TextFace {
    /// Build a face from raw font bytes.
    pub fn from_bytes(
        source: FaceSource,
        bytes: Vec<u8>,
        index: u32,
        size_px: f32,
    ) -> ThumbResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::asset("font size_px must be finite and > 0"));
        }
        let mut parsed = usvg::fontdb::Database::new();
        parsed.load_font_data(bytes.clone());
        if parsed.faces().next().is_none() {
            return Err(ThumbError::asset("font data contains no usable face"));
        }
        let weight = parsed
            .faces()
            .find(|f| f.index == index)
            .map(|f| f.weight)
            .ok_or_else(|| ThumbError::asset(format!("font data has no face at index {index}")))?;

        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(&(bytes.len() as u64).to_le_bytes());
        hasher.write_bytes(&bytes[..bytes.len().min(4096)]);
        hasher.write_bytes(&index.to_le_bytes());

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), index);
        Ok(Self {
            source,
            size_px,
            id: hasher.finish(),
            index,
            weight,
            font_bytes: Arc::new(bytes),
            font,
        })
    }

    pub fn source(&self) -> &FaceSource {
        &self.source
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Face index within the font file (non-zero only for collections).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn weight(&self) -> usvg::fontdb::Weight {
        self.weight
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn font_bytes(&self) -> &[u8] {
        self.font_bytes.as_slice()
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// Resolves faces: configured file first, then the system sans-serif.
///
/// The system database is scanned at most once, and only if a configured font is missing.
#[derive(Default)]
pub struct FaceResolver {
    system: Option<Arc<usvg::fontdb::Database>>,
}

impl FaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already-populated font database as the "system" fallback.
    pub fn with_database(db: usvg::fontdb::Database) -> Self {
        Self {
            system: Some(Arc::new(db)),
        }
    }

    /// Resolve a regular-weight face at `size_px`, or `None` when neither the configured file nor
    /// any system sans-serif font is usable.
    pub fn resolve(&mut self, custom: Option<&Path>, size_px: f32) -> Option<TextFace> {
        self.resolve_with_weight(custom, size_px, usvg::fontdb::Weight::NORMAL)
    }

    /// Like [`Self::resolve`]; `weight` only steers the system fallback, a configured file is used
    /// as is.
    pub fn resolve_with_weight(
        &mut self,
        custom: Option<&Path>,
        size_px: f32,
        weight: usvg::fontdb::Weight,
    ) -> Option<TextFace> {
        if let Some(path) = custom {
            match load_custom(path, size_px) {
                Ok(face) => return Some(face),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "configured font unusable; falling back to system default"
                    );
                }
            }
        }

        match self.system_default(size_px, weight) {
            Ok(face) => Some(face),
            Err(err) => {
                tracing::warn!(error = %err, "no system default font available");
                None
            }
        }
    }

    fn system_default(
        &mut self,
        size_px: f32,
        weight: usvg::fontdb::Weight,
    ) -> ThumbResult<TextFace> {
        let db = self
            .system
            .get_or_insert_with(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                Arc::new(db)
            })
            .clone();

        let families = [usvg::fontdb::Family::SansSerif];
        let query = usvg::fontdb::Query {
            families: &families,
            weight,
            ..Default::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| ThumbError::asset("system font database is empty"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ThumbError::asset("system font face data unavailable"))?;
        TextFace::from_bytes(FaceSource::SystemDefault, bytes, index, size_px)
    }
}

fn load_custom(path: &Path, size_px: f32) -> ThumbResult<TextFace> {
    let bytes = std::fs::read(path)
        .map_err(|e| ThumbError::asset(format!("read font '{}': {e}", path.display())))?;
    TextFace::from_bytes(FaceSource::Custom(path.to_path_buf()), bytes, 0, size_px)
}

#[cfg(test)]
#[path = "../../tests/unit/text/face.rs"]
mod tests;
