use std::env;
use std::path::PathBuf;

const DEFAULT_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MODEL: &str = "model/breeds.onnx";
const DEFAULT_LABELS: &str = "data/labels.csv";
const DEFAULT_DB: &str = "users.db";
const DEFAULT_BACKEND: &str = "onnx";

/// Server configuration, read once at startup.
///
/// Paths are not validated here; loading the labels, model, and database
/// validates them and any failure aborts startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub db_path: PathBuf,
    pub backend: String,
}

impl Config {
    /// Read configuration from `KENNEL_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("KENNEL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            model_path: env::var("KENNEL_MODEL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL)),
            labels_path: env::var("KENNEL_LABELS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LABELS)),
            db_path: env::var("KENNEL_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB)),
            backend: env::var("KENNEL_BACKEND").unwrap_or_else(|_| DEFAULT_BACKEND.to_string()),
        }
    }
}
