//! Loads legacy Keras HDF5 sentiment models: the architecture descriptor is
//! read from the `model_config` attribute, rebuilt into a [`Sequential`],
//! and the stored weights are bound layer by layer.
//!
//! Loading is attempted against the current descriptor schema first; when
//! that fails the legacy rewrite from [`compat`] is applied once and the
//! build retried.

use std::path::Path;

use hdf5::{types::VarLenUnicode, File as H5File, Group};
use ndarray::{Array1, Array2};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    activations::Activation,
    layers::{Dense, Dropout, Embedding, Layer, Lstm, SimpleRnn},
    Error, Result,
};

use super::{compat, Sequential};

pub fn load_model(path: &Path) -> Result<Sequential> {
    info!(path = %path.display(), "loading model artifact");

    let file = H5File::open(path)
        .map_err(|e| Error::ModelLoad(format!("Failed to open artifact {}: {}", path.display(), e)))?;
    let mut config = read_model_config(&file)?;

    match build_model(&file, &config) {
        Ok(model) => {
            debug!(layers = model.num_layers(), "artifact uses current schema");
            Ok(model)
        }
        Err(e) => {
            warn!(error = %e, "standard load failed, rewriting legacy descriptor");
            compat::rewrite_legacy_config(&mut config);
            let model = build_model(&file, &config)?;
            info!(layers = model.num_layers(), "legacy artifact loaded after rewrite");
            Ok(model)
        }
    }
}

fn read_model_config(file: &H5File) -> Result<Value> {
    let attr = file.attr("model_config").map_err(|_| {
        Error::MalformedArtifact("model_config attribute not found in artifact".to_string())
    })?;
    let raw: VarLenUnicode = attr
        .read_scalar()
        .map_err(|e| Error::ModelLoad(format!("Failed to read model_config: {}", e)))?;
    Ok(serde_json::from_str(raw.as_str())?)
}

fn build_model(file: &H5File, config: &Value) -> Result<Sequential> {
    let model_name = config["config"]["name"].as_str().unwrap_or("model").to_string();

    let layer_configs = config["config"]["layers"]
        .as_array()
        .ok_or_else(|| Error::MalformedArtifact("no layers found in descriptor".to_string()))?;

    let weights = file
        .group("model_weights")
        .map_err(|_| Error::ModelLoad("model_weights group not found in artifact".to_string()))?;

    let mut model = Sequential::new(model_name);

    for layer_config in layer_configs {
        let class_name = layer_config["class_name"]
            .as_str()
            .ok_or_else(|| Error::MalformedArtifact("layer missing class_name".to_string()))?;

        let layer_name = layer_config["config"]["name"]
            .as_str()
            .ok_or_else(|| Error::MalformedArtifact("layer missing name".to_string()))?
            .to_string();

        compat::check_current_schema(&layer_config["config"])?;

        let layer: Box<dyn Layer> = match class_name {
            "InputLayer" => {
                if let Some(shape) = layer_config["config"]["input_shape"].as_array() {
                    let input_shape: Vec<usize> = shape
                        .iter()
                        .filter_map(|v| v.as_u64().map(|n| n as usize))
                        .collect();
                    if !input_shape.is_empty() {
                        model.set_input_shape(input_shape);
                    }
                }
                continue;
            }
            "Embedding" => load_embedding_layer(&weights, &layer_name, layer_config)?,
            "LSTM" => load_lstm_layer(&weights, &layer_name, layer_config)?,
            "SimpleRNN" => load_simple_rnn_layer(&weights, &layer_name, layer_config)?,
            "Dense" => load_dense_layer(&weights, &layer_name, layer_config)?,
            "Dropout" => {
                let rate = layer_config["config"]["rate"].as_f64().unwrap_or(0.5) as f32;
                Box::new(Dropout::new(layer_name, rate))
            }
            _ => return Err(Error::UnsupportedLayer(class_name.to_string())),
        };

        model.add(layer);
    }

    Ok(model)
}

/// Legacy Keras nests each layer's variables under a group of the layer's
/// own name, i.e. `model_weights/<layer>/<layer>/kernel:0`.
fn layer_vars(weights: &Group, layer_name: &str) -> Result<Group> {
    weights
        .group(&format!("{}/{}", layer_name, layer_name))
        .or_else(|_| weights.group(layer_name))
        .map_err(|_| Error::ModelLoad(format!("Weights not found for layer: {}", layer_name)))
}

fn read_matrix(vars: &Group, dataset: &str, layer_name: &str) -> Result<Array2<f32>> {
    let ds = vars.dataset(dataset).map_err(|_| {
        Error::ModelLoad(format!("{} not found for layer: {}", dataset, layer_name))
    })?;

    let shape = ds.shape();
    if shape.len() != 2 {
        return Err(Error::ModelLoad(format!(
            "{} for layer {} is not 2-dimensional: {:?}",
            dataset, layer_name, shape
        )));
    }

    let data: Vec<f32> = ds
        .read_raw()
        .map_err(|e| Error::ModelLoad(format!("Failed to read {}: {}", dataset, e)))?;

    Array2::from_shape_vec((shape[0], shape[1]), data)
        .map_err(|e| Error::ModelLoad(format!("Failed to shape {}: {}", dataset, e)))
}

fn read_vector(vars: &Group, dataset: &str, layer_name: &str) -> Result<Array1<f32>> {
    let ds = vars.dataset(dataset).map_err(|_| {
        Error::ModelLoad(format!("{} not found for layer: {}", dataset, layer_name))
    })?;

    let data: Vec<f32> = ds
        .read_raw()
        .map_err(|e| Error::ModelLoad(format!("Failed to read {}: {}", dataset, e)))?;

    Ok(Array1::from_vec(data))
}

fn required_usize(config: &Value, field: &str, class_name: &str) -> Result<usize> {
    config["config"][field]
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| {
            Error::MalformedArtifact(format!("{} layer missing {}", class_name, field))
        })
}

fn layer_activation(config: &Value, field: &str, default: &str) -> Result<Activation> {
    Activation::from_str(config["config"][field].as_str().unwrap_or(default))
}

fn load_embedding_layer(
    weights: &Group,
    layer_name: &str,
    config: &Value,
) -> Result<Box<dyn Layer>> {
    let input_dim = required_usize(config, "input_dim", "Embedding")?;

    let vars = layer_vars(weights, layer_name)?;
    let table = read_matrix(&vars, "embeddings:0", layer_name)?;

    Ok(Box::new(Embedding::new(
        layer_name.to_string(),
        table,
        input_dim,
    )?))
}

fn load_lstm_layer(weights: &Group, layer_name: &str, config: &Value) -> Result<Box<dyn Layer>> {
    let units = required_usize(config, "units", "LSTM")?;
    let activation = layer_activation(config, "activation", "tanh")?;
    let recurrent_activation = layer_activation(config, "recurrent_activation", "sigmoid")?;
    let use_bias = config["config"]["use_bias"].as_bool().unwrap_or(true);

    let vars = layer_vars(weights, layer_name)?;
    let kernel = read_matrix(&vars, "kernel:0", layer_name)?;
    let recurrent_kernel = read_matrix(&vars, "recurrent_kernel:0", layer_name)?;
    let bias = if use_bias {
        Some(read_vector(&vars, "bias:0", layer_name)?)
    } else {
        None
    };

    Ok(Box::new(Lstm::new(
        layer_name.to_string(),
        kernel,
        recurrent_kernel,
        bias,
        units,
        activation,
        recurrent_activation,
    )?))
}

fn load_simple_rnn_layer(
    weights: &Group,
    layer_name: &str,
    config: &Value,
) -> Result<Box<dyn Layer>> {
    let units = required_usize(config, "units", "SimpleRNN")?;
    let activation = layer_activation(config, "activation", "tanh")?;
    let use_bias = config["config"]["use_bias"].as_bool().unwrap_or(true);

    let vars = layer_vars(weights, layer_name)?;
    let kernel = read_matrix(&vars, "kernel:0", layer_name)?;
    let recurrent_kernel = read_matrix(&vars, "recurrent_kernel:0", layer_name)?;
    let bias = if use_bias {
        Some(read_vector(&vars, "bias:0", layer_name)?)
    } else {
        None
    };

    Ok(Box::new(SimpleRnn::new(
        layer_name.to_string(),
        kernel,
        recurrent_kernel,
        bias,
        units,
        activation,
    )?))
}

fn load_dense_layer(weights: &Group, layer_name: &str, config: &Value) -> Result<Box<dyn Layer>> {
    let units = required_usize(config, "units", "Dense")?;
    let activation = layer_activation(config, "activation", "linear")?;
    let use_bias = config["config"]["use_bias"].as_bool().unwrap_or(true);

    let vars = layer_vars(weights, layer_name)?;
    let kernel = read_matrix(&vars, "kernel:0", layer_name)?;
    if kernel.ncols() != units {
        return Err(Error::ShapeMismatch {
            expected: vec![kernel.nrows(), units],
            actual: vec![kernel.nrows(), kernel.ncols()],
        });
    }

    let bias = if use_bias {
        Some(read_vector(&vars, "bias:0", layer_name)?)
    } else {
        None
    };

    Ok(Box::new(Dense::new(
        layer_name.to_string(),
        kernel,
        bias,
        activation,
    )?))
}
