use ndarray::{s, Array1, Array2, Ix3};

use crate::{activations::Activation, Error, Result, Tensor};

/// Inference-only LSTM with Keras weight layout: the kernel and recurrent
/// kernel hold all four gates fused column-wise in `i, f, c, o` order.
/// Only `return_sequences = false` is supported, so the output is the final
/// hidden state, `[batch, units]`.
#[derive(Debug, Clone)]
pub struct Lstm {
    name: String,
    kernel: Array2<f32>,
    recurrent_kernel: Array2<f32>,
    bias: Option<Array1<f32>>,
    units: usize,
    activation: Activation,
    recurrent_activation: Activation,
}

impl Lstm {
    pub fn new(
        name: String,
        kernel: Array2<f32>,
        recurrent_kernel: Array2<f32>,
        bias: Option<Array1<f32>>,
        units: usize,
        activation: Activation,
        recurrent_activation: Activation,
    ) -> Result<Self> {
        if kernel.ncols() != 4 * units {
            return Err(Error::ShapeMismatch {
                expected: vec![kernel.nrows(), 4 * units],
                actual: vec![kernel.nrows(), kernel.ncols()],
            });
        }
        if recurrent_kernel.nrows() != units || recurrent_kernel.ncols() != 4 * units {
            return Err(Error::ShapeMismatch {
                expected: vec![units, 4 * units],
                actual: vec![recurrent_kernel.nrows(), recurrent_kernel.ncols()],
            });
        }
        if let Some(ref b) = bias {
            if b.len() != 4 * units {
                return Err(Error::ShapeMismatch {
                    expected: vec![4 * units],
                    actual: vec![b.len()],
                });
            }
        }

        Ok(Self {
            name,
            kernel,
            recurrent_kernel,
            bias,
            units,
            activation,
            recurrent_activation,
        })
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl super::Layer for Lstm {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let x = input
            .data()
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|_| {
                Error::Layer(format!(
                    "LSTM layer expects 3D input [batch, steps, features], got {:?}",
                    input.shape()
                ))
            })?;

        let (batch, steps, features) = x.dim();
        if features != self.kernel.nrows() {
            return Err(Error::ShapeMismatch {
                expected: vec![self.kernel.nrows()],
                actual: vec![features],
            });
        }

        let u = self.units;
        let mut output = Array2::<f32>::zeros((batch, u));

        for b in 0..batch {
            let mut h = Array1::<f32>::zeros(u);
            let mut c = Array1::<f32>::zeros(u);

            for t in 0..steps {
                let mut z = x.slice(s![b, t, ..]).dot(&self.kernel)
                    + h.dot(&self.recurrent_kernel);
                if let Some(ref bias) = self.bias {
                    z += bias;
                }

                for j in 0..u {
                    let i_gate = self.recurrent_activation.call(z[j]);
                    let f_gate = self.recurrent_activation.call(z[u + j]);
                    let g = self.activation.call(z[2 * u + j]);
                    let o_gate = self.recurrent_activation.call(z[3 * u + j]);

                    c[j] = f_gate * c[j] + i_gate * g;
                    h[j] = o_gate * self.activation.call(c[j]);
                }
            }

            output.slice_mut(s![b, ..]).assign(&h);
        }

        Ok(Tensor::new(output.into_dyn()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        match input_shape {
            [b, _, _] => Ok(vec![*b, self.units]),
            _ => Err(Error::Layer(format!(
                "LSTM layer expects 3D input [batch, steps, features], got {:?}",
                input_shape
            ))),
        }
    }
}
