//! # Review Sentiment
//!
//! HTTP inference service for two pretrained IMDB review sentiment models,
//! an LSTM and a SimpleRNN, stored as legacy Keras HDF5 artifacts.
//!
//! Review text is normalized and encoded to a fixed-length token sequence
//! against the IMDB word index, run through both models, and the scalar
//! sigmoid outputs are thresholded into Positive/Negative labels.
//!
//! ```rust,ignore
//! use review_sentiment::Sequential;
//!
//! let model = Sequential::load("public/models/model_lstm.h5")?;
//! let output = model.predict(&input)?;
//! ```

pub mod activations;
pub mod config;
pub mod error;
pub mod layers;
pub mod model;
pub mod server;
pub mod service;
pub mod tensor;
pub mod tokenizer;
pub mod vocab;

pub use error::{Error, Result};
pub use model::Sequential;
pub use tensor::Tensor;
