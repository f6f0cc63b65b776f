use std::path::Path;

use crate::{layers::Layer, Error, Result, Tensor};

#[derive(Debug)]
pub struct Sequential {
    name: String,
    layers: Vec<Box<dyn Layer>>,
    input_shape: Option<Vec<usize>>,
}

impl Sequential {
    pub fn new(name: String) -> Self {
        Self {
            name,
            layers: Vec::new(),
            input_shape: None,
        }
    }

    /// Loads a Keras HDF5 artifact, applying the legacy-descriptor rewrite
    /// when the stored architecture uses the old schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        super::loader::load_model(path.as_ref())
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn set_input_shape(&mut self, shape: Vec<usize>) {
        self.input_shape = Some(shape);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    pub fn predict(&self, input: &Tensor) -> Result<Tensor> {
        if self.layers.is_empty() {
            return Err(Error::ModelLoad(
                "Cannot predict with empty model".to_string(),
            ));
        }

        let mut current = input.clone();

        for (idx, layer) in self.layers.iter().enumerate() {
            current = layer
                .forward(&current)
                .map_err(|e| Error::Layer(format!("Layer {} ({}): {}", idx, layer.name(), e)))?;
        }

        Ok(current)
    }

    pub fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        let mut current_shape = input_shape.to_vec();

        for layer in &self.layers {
            current_shape = layer.output_shape(&current_shape)?;
        }

        Ok(current_shape)
    }

    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Model: {}\n", self.name));
        s.push_str("Layer (type)                 Output Shape\n");
        s.push_str("============================================\n");

        let mut current_shape = self.input_shape.clone().unwrap_or_default();

        for layer in &self.layers {
            if !current_shape.is_empty() {
                current_shape = layer.output_shape(&current_shape).unwrap_or_default();
            }
            s.push_str(&format!("{:28} {:?}\n", layer.name(), current_shape));
        }

        s.push_str(&format!("Total layers: {}\n", self.layers.len()));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;
    use crate::layers::{Dense, Embedding, Lstm};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    fn tiny_sentiment_model() -> Sequential {
        let mut model = Sequential::new("tiny".to_string());

        let embeddings = array![[0.0, 0.0], [1.0, 0.5], [0.5, 1.0], [0.2, 0.2]];
        model.add(Box::new(
            Embedding::new("embedding".to_string(), embeddings, 4).unwrap(),
        ));

        let lstm = Lstm::new(
            "lstm".to_string(),
            Array2::zeros((2, 8)),
            Array2::zeros((2, 8)),
            Some(Array1::zeros(8)),
            2,
            Activation::Tanh,
            Activation::Sigmoid,
        )
        .unwrap();
        model.add(Box::new(lstm));

        let head = Dense::new(
            "dense".to_string(),
            Array2::zeros((2, 1)),
            None,
            Activation::Sigmoid,
        )
        .unwrap();
        model.add(Box::new(head));

        model
    }

    #[test]
    fn test_predict_through_full_stack() {
        let model = tiny_sentiment_model();
        let input = Tensor::from_vec(vec![1.0, 2.0, 0.0], &[1, 3]).unwrap();
        let output = model.predict(&input).unwrap();

        // zero weights throughout, so the sigmoid head sits at 0.5
        assert_eq!(output.shape(), &[1, 1]);
        assert_abs_diff_eq!(output.scalar().unwrap(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_output_shape_propagation() {
        let model = tiny_sentiment_model();
        assert_eq!(model.output_shape(&[1, 200]).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_empty_model_rejects_predict() {
        let model = Sequential::new("empty".to_string());
        let input = Tensor::from_vec(vec![1.0], &[1, 1]).unwrap();
        assert!(model.predict(&input).is_err());
    }
}
