use crate::InferError;
use kennel_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to run.
///
/// `run` is synchronous and performs no retries; callers own any queueing.
/// Sessions are `Send` so a server can park one behind a lock and run it on
/// a blocking-thread pool.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
