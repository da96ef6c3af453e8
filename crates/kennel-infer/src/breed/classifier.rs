use crate::breed::labels::{LabelError, LabelTable};
use crate::breed::postprocess::{argmax, confidence_percent};
use crate::breed::preprocess::normalize;
use crate::breed::types::Prediction;
use crate::{Backend, InferError, ModelSource, Session};
use kennel_image::ImageError;
use std::fmt;

/// Per-request failure, tagged by cause.
///
/// `Decode` is a caller error (bad upload); `Inference` and `Label` are
/// model-side failures. A `Label` cause means the label table and model
/// output sizes disagree, which is a deployment defect rather than a user
/// error, but it still surfaces as a value instead of crashing the process.
#[derive(Debug)]
pub enum ClassifyError {
    Decode(ImageError),
    Inference(InferError),
    Label(LabelError),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Decode(err) => write!(f, "invalid image data: {err}"),
            ClassifyError::Inference(err) => write!(f, "inference failed: {err}"),
            ClassifyError::Label(err) => write!(f, "label resolution failed: {err}"),
        }
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassifyError::Decode(err) => Some(err),
            ClassifyError::Inference(err) => Some(err),
            ClassifyError::Label(err) => Some(err),
        }
    }
}

impl From<ImageError> for ClassifyError {
    fn from(err: ImageError) -> Self {
        ClassifyError::Decode(err)
    }
}

impl From<InferError> for ClassifyError {
    fn from(err: InferError) -> Self {
        ClassifyError::Inference(err)
    }
}

impl From<LabelError> for ClassifyError {
    fn from(err: LabelError) -> Self {
        ClassifyError::Label(err)
    }
}

/// End-to-end breed classification pipeline.
///
/// Composes decode, normalization, model inference, and label resolution
/// into a single `classify()` call. Holds the loaded model session and the
/// label table for the process lifetime; neither mutates after construction.
pub struct BreedClassifier {
    session: Box<dyn Session>,
    labels: LabelTable,
}

impl BreedClassifier {
    /// Load the model through `backend` and pair it with a label table.
    ///
    /// # Arguments
    /// * `model` - Model source (file path or in-memory bytes)
    /// * `backend` - Backend to execute the model (e.g. `OnnxBackend`)
    /// * `labels` - Loaded label table; index convention must match the model
    pub fn new(
        model: ModelSource,
        backend: &dyn Backend,
        labels: LabelTable,
    ) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;

        Ok(Self { session, labels })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Classify raw image bytes.
    ///
    /// Pipeline: decode to RGB, normalize to `[1, 224, 224, 3]`, run the
    /// model, take the leftmost argmax of the output scores, resolve it
    /// through the label table. Confidence is the argmax score as a
    /// percentage rounded to two decimals.
    ///
    /// Repeated calls with the same bytes return the same prediction; no
    /// state is retained between calls.
    pub fn classify(&mut self, image: &[u8]) -> Result<Prediction, ClassifyError> {
        let frame = kennel_image::decode_rgb(image)?;
        let input = normalize(&frame)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Runtime("model has no inputs".to_string()))?
            .clone();

        let outputs = self.session.run(&[(input_name.as_str(), input)])?;

        let output_name = self
            .session
            .output_names()
            .first()
            .ok_or_else(|| InferError::Runtime("model has no outputs".to_string()))?;
        let output = outputs.get(output_name).ok_or_else(|| {
            InferError::Runtime(format!("model produced no output '{output_name}'"))
        })?;

        // Output arrives as [1, N] or [N]; row-major data flattens the same
        let scores = &output.data;
        let top = argmax(scores)
            .ok_or_else(|| InferError::Runtime("model produced empty output".to_string()))?;

        let breed = self.labels.resolve(top)?.to_string();

        Ok(Prediction {
            breed,
            confidence: confidence_percent(scores[top]),
        })
    }
}
