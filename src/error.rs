use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Model loading error: {0}")]
    ModelLoad(String),

    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Unsupported layer type: {0}")]
    UnsupportedLayer(String),

    #[error("Unsupported activation: {0}")]
    UnsupportedActivation(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("{0}")]
    Validation(String),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
