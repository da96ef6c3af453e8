//! Image decoding and resizing for the kennel workspace.
//!
//! Wraps the `image` crate to turn arbitrary uploaded bytes into 8-bit RGB
//! frames backed by `Tensor<u8>` from `kennel-base`, and to resize them for
//! model input. Frames use HWC layout: `[height, width, 3]`.

pub mod error;
pub mod types;

pub use error::ImageError;
pub use types::RgbFrame;

use image::imageops::FilterType;
use kennel_base::Tensor;

/// Decode an image from raw bytes into an 8-bit RGB frame.
///
/// The format is auto-detected by the `image` crate. Any source pixel mode
/// (grayscale, palette, 16-bit, alpha) is converted to RGB; alpha channels
/// are dropped.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the bytes cannot be interpreted as an
/// image in any supported format.
pub fn decode_rgb(data: &[u8]) -> Result<RgbFrame, ImageError> {
    let img = image::load_from_memory(data)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let tensor = Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?;

    Ok(RgbFrame::new(tensor))
}

/// Resize an RGB frame to exactly `width` x `height`.
///
/// Aspect ratio is not preserved. Uses the Triangle (bilinear) filter, which
/// is deterministic: identical inputs produce identical outputs.
pub fn resize_rgb(frame: &RgbFrame, width: u32, height: u32) -> Result<RgbFrame, ImageError> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);

    let buffer: image::RgbImage =
        image::ImageBuffer::from_raw(w, h, frame.tensor().data.clone()).ok_or_else(|| {
            ImageError::Decode(format!("frame buffer does not match {w}x{h} RGB"))
        })?;

    let resized = image::imageops::resize(&buffer, width, height, FilterType::Triangle);

    let tensor = Tensor::new(
        vec![height as usize, width as usize, 3],
        resized.into_raw(),
    )?;

    Ok(RgbFrame::new(tensor))
}
