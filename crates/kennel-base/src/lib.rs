//! Shared leaf crate for the kennel workspace.
//!
//! Provides the `Tensor<T>` interchange type passed between the image and
//! inference crates, plus process-wide logging setup.

pub mod logging;
pub mod tensor;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use tensor::{Tensor, TensorError};

// Re-export log so downstream crates can use kennel_base::log::*
pub use log;
