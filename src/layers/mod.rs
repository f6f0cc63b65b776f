pub mod dense;
pub mod dropout;
pub mod embedding;
pub mod lstm;
pub mod simple_rnn;

use crate::{Result, Tensor};

pub trait Layer: std::fmt::Debug + Send + Sync {
    fn forward(&self, input: &Tensor) -> Result<Tensor>;
    fn name(&self) -> &str;
    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>>;
}

pub use dense::Dense;
pub use dropout::Dropout;
pub use embedding::Embedding;
pub use lstm::Lstm;
pub use simple_rnn::SimpleRnn;
