use ndarray::Zip;

use crate::{Error, Result, Tensor};

/// Pointwise activations used by the sentiment models. `HardSigmoid` is the
/// recurrent activation older Keras versions baked into LSTM configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    ReLU,
    Sigmoid,
    HardSigmoid,
    Tanh,
}

impl Activation {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "none" => Ok(Activation::Linear),
            "relu" => Ok(Activation::ReLU),
            "sigmoid" => Ok(Activation::Sigmoid),
            "hard_sigmoid" => Ok(Activation::HardSigmoid),
            "tanh" => Ok(Activation::Tanh),
            _ => Err(Error::UnsupportedActivation(s.to_string())),
        }
    }

    pub fn call(&self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::ReLU => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::HardSigmoid => (0.2 * x + 0.5).clamp(0.0, 1.0),
            Activation::Tanh => x.tanh(),
        }
    }

    pub fn apply(&self, tensor: &mut Tensor) {
        if *self == Activation::Linear {
            return;
        }
        Zip::from(tensor.data_mut()).for_each(|x| {
            *x = self.call(*x);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_relu() {
        let mut tensor = Tensor::from_vec(vec![-1.0, 0.0, 1.0, 2.0], &[4]).unwrap();
        Activation::ReLU.apply(&mut tensor);
        assert_eq!(tensor.to_vec(), vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert_abs_diff_eq!(Activation::Sigmoid.call(0.0), 0.5, epsilon = 1e-6);
        assert!(Activation::Sigmoid.call(10.0) > 0.99);
        assert!(Activation::Sigmoid.call(-10.0) < 0.01);
    }

    #[test]
    fn test_hard_sigmoid_saturation() {
        assert_eq!(Activation::HardSigmoid.call(-3.0), 0.0);
        assert_eq!(Activation::HardSigmoid.call(3.0), 1.0);
        assert_abs_diff_eq!(Activation::HardSigmoid.call(0.0), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Activation::from_str("tanh").unwrap(), Activation::Tanh);
        assert_eq!(
            Activation::from_str("hard_sigmoid").unwrap(),
            Activation::HardSigmoid
        );
        assert!(Activation::from_str("softplus").is_err());
    }
}
