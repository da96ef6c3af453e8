use crate::{Backend, Device};
use std::collections::HashMap;

/// Name-keyed set of available backends.
///
/// The model architecture reference in the server configuration is resolved
/// here; an unknown name is a startup failure, not a per-request one.
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    pub fn register(&mut self, backend: Box<dyn Backend>) {
        let name = backend.name().to_string();
        self.backends.insert(name, backend);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Backend> {
        self.backends.get(name).map(|b| &**b as &dyn Backend)
    }

    pub fn list(&self) -> Vec<&str> {
        self.backends.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry of compiled-in backends for the given device.
pub fn create_registry(device: Device) -> BackendRegistry {
    use crate::backends::OnnxBackend;

    let mut registry = BackendRegistry::new();
    registry.register(Box::new(OnnxBackend::new(device)));
    registry
}
