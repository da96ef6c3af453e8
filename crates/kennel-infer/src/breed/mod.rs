pub mod classifier;
pub mod labels;
pub mod postprocess;
pub mod preprocess;
pub mod types;

pub use classifier::{BreedClassifier, ClassifyError};
pub use labels::{LabelError, LabelTable};
pub use postprocess::{argmax, confidence_percent};
pub use preprocess::{INPUT_SIZE, normalize};
pub use types::Prediction;
