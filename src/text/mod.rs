pub(crate) mod engine;
pub(crate) mod face;
pub(crate) mod fit;
