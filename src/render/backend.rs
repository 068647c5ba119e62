use crate::{foundation::error::ThumbResult, model::track::RenderRequest};

/// Turns a render request plus raw artwork bytes into encoded PNG bytes.
///
/// Implementations are synchronous and CPU-bound; the pipeline runs them on the blocking pool.
pub trait RenderBackend: Send + Sync + 'static {
    fn render_png(&self, request: &RenderRequest, artwork: &[u8]) -> ThumbResult<Vec<u8>>;
}
