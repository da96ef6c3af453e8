//! Inference abstraction and breed-classification pipeline.
//!
//! The `Backend`/`Session` traits decouple model execution from the rest of
//! the pipeline; `backends::OnnxBackend` is the production implementation on
//! ONNX Runtime. `breed` holds the domain pipeline: label table, input
//! normalization, argmax postprocessing, and the `BreedClassifier` facade.

pub mod backend;
pub mod backendregistry;
pub mod backends;
pub mod breed;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use backendregistry::{BackendRegistry, create_registry};
pub use breed::{BreedClassifier, ClassifyError, LabelError, LabelTable, Prediction};
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;
