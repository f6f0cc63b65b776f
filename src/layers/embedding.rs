use ndarray::{Array2, Array3, Ix2};

use crate::{Error, Result, Tensor};

/// Token-id lookup table: maps a `[batch, steps]` sequence of ids to a
/// `[batch, steps, output_dim]` tensor of embedding vectors.
#[derive(Debug, Clone)]
pub struct Embedding {
    name: String,
    weights: Array2<f32>,
    input_dim: usize,
    output_dim: usize,
}

impl Embedding {
    pub fn new(name: String, weights: Array2<f32>, input_dim: usize) -> Result<Self> {
        if weights.nrows() != input_dim {
            return Err(Error::ShapeMismatch {
                expected: vec![input_dim, weights.ncols()],
                actual: vec![weights.nrows(), weights.ncols()],
            });
        }
        let output_dim = weights.ncols();
        Ok(Self {
            name,
            weights,
            input_dim,
            output_dim,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }
}

impl super::Layer for Embedding {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let ids = input
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| {
                Error::Layer(format!(
                    "Embedding layer expects 2D input [batch, steps], got {:?}",
                    input.shape()
                ))
            })?;

        let (batch, steps) = ids.dim();
        let mut output = Array3::<f32>::zeros((batch, steps, self.output_dim));

        for b in 0..batch {
            for t in 0..steps {
                let id = ids[[b, t]];
                if id < 0.0 || id.fract() != 0.0 {
                    return Err(Error::Layer(format!(
                        "Embedding input must be non-negative integer ids, got {}",
                        id
                    )));
                }
                let id = id as usize;
                if id >= self.input_dim {
                    return Err(Error::Layer(format!(
                        "Token id {} out of range for embedding of size {}",
                        id, self.input_dim
                    )));
                }
                output
                    .slice_mut(ndarray::s![b, t, ..])
                    .assign(&self.weights.row(id));
            }
        }

        Ok(Tensor::new(output.into_dyn()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        match input_shape {
            [b, s] => Ok(vec![*b, *s, self.output_dim]),
            _ => Err(Error::Layer(format!(
                "Embedding layer expects 2D input [batch, steps], got {:?}",
                input_shape
            ))),
        }
    }
}
