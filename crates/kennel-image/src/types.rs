use kennel_base::Tensor;

/// An 8-bit RGB image in HWC layout `[height, width, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    tensor: Tensor<u8>,
}

impl RgbFrame {
    /// Wrap an HWC tensor. Callers are expected to hand in `[h, w, 3]` data;
    /// `decode_rgb` and `resize_rgb` always do.
    pub fn new(tensor: Tensor<u8>) -> Self {
        Self { tensor }
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.tensor
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.tensor.shape[2]
    }
}
