use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// Model artifact unreadable or incompatible with the backend.
    ModelLoad(String),
    /// No registered backend under the requested name.
    UnknownBackend(String),
    UnsupportedDevice(Device),
    /// Input name not among the model's declared inputs.
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    Shape {
        expected: String,
        got: String,
    },
    UnsupportedDtype(String),
    Runtime(String),
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::UnknownBackend(name) => write!(f, "unknown backend: {name}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', expected one of {expected_names:?}"
            ),
            InferError::Shape { expected, got } => {
                write!(f, "shape error: expected {expected}, got {got}")
            }
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}
