use crate::InferError;
use kennel_base::Tensor;
use kennel_image::RgbFrame;

/// Model input edge length in pixels.
pub const INPUT_SIZE: usize = 224;

/// Normalize a decoded RGB frame into the model input tensor.
///
/// Resizes to 224x224 with the Triangle filter (aspect ratio is not
/// preserved), rescales pixel values from [0, 255] to [0.0, 1.0] by
/// dividing by 255, and adds a leading batch dimension.
///
/// Output shape: `[1, 224, 224, 3]` (NHWC). Deterministic: identical
/// frames produce bit-identical tensors.
pub fn normalize(frame: &RgbFrame) -> Result<Tensor<f32>, InferError> {
    if frame.channels() != 3 {
        return Err(InferError::Shape {
            expected: "3 channels".to_string(),
            got: format!("{} channels", frame.channels()),
        });
    }
    if frame.height() == 0 || frame.width() == 0 {
        return Err(InferError::Shape {
            expected: "non-zero image dimensions".to_string(),
            got: format!("{}x{}", frame.width(), frame.height()),
        });
    }

    let resized = kennel_image::resize_rgb(frame, INPUT_SIZE as u32, INPUT_SIZE as u32)
        .map_err(|e| InferError::Runtime(format!("resize failed: {e}")))?;

    let data: Vec<f32> = resized
        .tensor()
        .data
        .iter()
        .map(|&v| v as f32 / 255.0)
        .collect();

    Tensor::new(vec![1, INPUT_SIZE, INPUT_SIZE, 3], data)
        .map_err(|e| InferError::Runtime(format!("failed to create tensor: {e}")))
}
