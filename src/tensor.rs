use ndarray::{Array, ArrayD, IxDyn};

use crate::{Error, Result};

/// Dense f32 tensor backing all layer inputs and outputs.
#[derive(Clone, Debug)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    pub fn new(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    pub fn from_vec(vec: Vec<f32>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        let actual = vec.len();
        let data = Array::from_shape_vec(IxDyn(shape), vec).map_err(|_| Error::ShapeMismatch {
            expected: vec![expected],
            actual: vec![actual],
        })?;
        Ok(Self { data })
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }

    pub fn into_data(self) -> ArrayD<f32> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        let total: usize = new_shape.iter().product();
        if total != self.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![total],
                actual: vec![self.len()],
            });
        }

        let reshaped = self
            .data
            .clone()
            .into_shape_with_order(IxDyn(new_shape))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;
        Ok(Self { data: reshaped })
    }

    /// Extracts the single element of a one-element tensor, e.g. the scalar
    /// score of a binary classifier head.
    pub fn scalar(&self) -> Result<f32> {
        if self.len() != 1 {
            return Err(Error::Layer(format!(
                "Expected scalar output, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.data.iter().copied().next().unwrap_or(0.0))
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

impl From<ArrayD<f32>> for Tensor {
    fn from(data: ArrayD<f32>) -> Self {
        Self::new(data)
    }
}

impl AsRef<ArrayD<f32>> for Tensor {
    fn as_ref(&self) -> &ArrayD<f32> {
        &self.data
    }
}
