use ndarray::{Array1, Array2, IxDyn};

use crate::{activations::Activation, Error, Result, Tensor};

#[derive(Debug, Clone)]
pub struct Dense {
    name: String,
    weights: Array2<f32>,
    bias: Option<Array1<f32>>,
    activation: Activation,
    units: usize,
}

impl Dense {
    pub fn new(
        name: String,
        weights: Array2<f32>,
        bias: Option<Array1<f32>>,
        activation: Activation,
    ) -> Result<Self> {
        let units = weights.ncols();

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
            weights,
            bias,
            activation,
            units,
        })
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl super::Layer for Dense {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let input_shape = input.shape().to_vec();

        let (batch_size, features) = match input_shape.as_slice() {
            [f] => (1, *f),
            [b, f] => (*b, *f),
            _ => {
                return Err(Error::Layer(format!(
                    "Dense layer expects 1D or 2D input, got {:?}",
                    input_shape
                )))
            }
        };

        if features != self.weights.nrows() {
            return Err(Error::ShapeMismatch {
                expected: vec![self.weights.nrows()],
                actual: vec![features],
            });
        }

        let input_2d = input
            .data()
            .to_owned()
            .into_shape_with_order((batch_size, features))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;

        let mut output = input_2d.dot(&self.weights);

        if let Some(ref bias) = self.bias {
            for mut row in output.rows_mut() {
                row += bias;
            }
        }

        let output_shape = if input_shape.len() == 1 {
            vec![self.units]
        } else {
            vec![batch_size, self.units]
        };

        let output_dyn = output
            .into_shape_with_order(IxDyn(&output_shape))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;

        let mut tensor = Tensor::new(output_dyn);
        self.activation.apply(&mut tensor);

        Ok(tensor)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        match input_shape {
            [_] => Ok(vec![self.units]),
            [b, _] => Ok(vec![*b, self.units]),
            _ => Err(Error::Layer(format!(
                "Dense layer expects 1D or 2D input, got {:?}",
                input_shape
            ))),
        }
    }
}
