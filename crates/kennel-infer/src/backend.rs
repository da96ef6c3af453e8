use crate::{InferError, ModelSource, Session};

/// A model-execution backend.
///
/// Loading is the only backend-specific step; the returned `Session` hides
/// the runtime behind a uniform run interface. Tests substitute stub
/// implementations so the pipeline can be exercised without model files.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
