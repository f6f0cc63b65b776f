use ndarray::{s, Array1, Array2, Ix3};

use crate::{activations::Activation, Error, Result, Tensor};

/// Inference-only Elman RNN: `h_t = act(x_t W + h_{t-1} U + b)`.
/// Output is the final hidden state, `[batch, units]`.
#[derive(Debug, Clone)]
pub struct SimpleRnn {
    name: String,
    kernel: Array2<f32>,
    recurrent_kernel: Array2<f32>,
    bias: Option<Array1<f32>>,
    units: usize,
    activation: Activation,
}

impl SimpleRnn {
    pub fn new(
        name: String,
        kernel: Array2<f32>,
        recurrent_kernel: Array2<f32>,
        bias: Option<Array1<f32>>,
        units: usize,
        activation: Activation,
    ) -> Result<Self> {
        if kernel.ncols() != units {
            return Err(Error::ShapeMismatch {
                expected: vec![kernel.nrows(), units],
                actual: vec![kernel.nrows(), kernel.ncols()],
            });
        }
        if recurrent_kernel.nrows() != units || recurrent_kernel.ncols() != units {
            return Err(Error::ShapeMismatch {
                expected: vec![units, units],
                actual: vec![recurrent_kernel.nrows(), recurrent_kernel.ncols()],
            });
        }
        if let Some(ref b) = bias {
            if b.len() != units {
                return Err(Error::ShapeMismatch {
                    expected: vec![units],
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
        })
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl super::Layer for SimpleRnn {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let x = input
            .data()
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|_| {
                Error::Layer(format!(
                    "SimpleRNN layer expects 3D input [batch, steps, features], got {:?}",
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

        let mut output = Array2::<f32>::zeros((batch, self.units));

        for b in 0..batch {
            let mut h = Array1::<f32>::zeros(self.units);

            for t in 0..steps {
                let mut z = x.slice(s![b, t, ..]).dot(&self.kernel)
                    + h.dot(&self.recurrent_kernel);
                if let Some(ref bias) = self.bias {
                    z += bias;
                }
                h = z.mapv(|v| self.activation.call(v));
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
                "SimpleRNN layer expects 3D input [batch, steps, features], got {:?}",
                input_shape
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Layer;
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_simple_rnn_single_step() {
        // h = tanh(x * 0.5) with no recurrence or bias
        let layer = SimpleRnn::new(
            "rnn".to_string(),
            array![[0.5]],
            array![[0.0]],
            None,
            1,
            Activation::Tanh,
        )
        .unwrap();

        let input = Tensor::from_vec(vec![2.0], &[1, 1, 1]).unwrap();
        let output = layer.forward(&input).unwrap();

        assert_eq!(output.shape(), &[1, 1]);
        assert_abs_diff_eq!(output.to_vec()[0], 1.0f32.tanh(), epsilon = 1e-6);
    }

    #[test]
    fn test_simple_rnn_carries_state() {
        // identity kernels with linear activation accumulate the inputs
        let layer = SimpleRnn::new(
            "rnn".to_string(),
            array![[1.0]],
            array![[1.0]],
            None,
            1,
            Activation::Linear,
        )
        .unwrap();

        let input = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[1, 3, 1]).unwrap();
        let output = layer.forward(&input).unwrap();

        assert_abs_diff_eq!(output.to_vec()[0], 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_simple_rnn_recurrent_shape_check() {
        let result = SimpleRnn::new(
            "rnn".to_string(),
            array![[1.0]],
            array![[1.0, 2.0]],
            None,
            1,
            Activation::Tanh,
        );
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }
}
