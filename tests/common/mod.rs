//! Builders for small legacy Keras HDF5 fixtures used by the integration
//! tests. Weights are zeroed except the classifier head bias, so the score
//! each model produces is sigmoid(head_bias) regardless of the input.

use std::path::Path;

use hdf5::types::VarLenUnicode;
use hdf5::{File, Group};
use serde_json::json;

pub enum Recurrent {
    Lstm,
    SimpleRnn,
}

pub fn write_string_attr(file: &File, name: &str, value: &str) {
    let attr = file.new_attr::<VarLenUnicode>().create(name).unwrap();
    attr.write_scalar(&value.parse::<VarLenUnicode>().unwrap())
        .unwrap();
}

fn write_dataset(group: &Group, name: &str, shape: &[usize], data: &[f32]) {
    let ds = group
        .new_dataset::<f32>()
        .shape(shape)
        .create(name)
        .unwrap();
    ds.write_raw(data).unwrap();
}

fn layer_group(weights: &Group, name: &str) -> Group {
    weights.create_group(name).unwrap().create_group(name).unwrap()
}

fn dtype_policy() -> serde_json::Value {
    json!({
        "module": "keras",
        "class_name": "DTypePolicy",
        "config": { "name": "float32" },
        "registered_name": null
    })
}

/// Writes a legacy artifact: Embedding(16 -> 4) -> recurrent(3 units) ->
/// Dropout -> Dense(1, sigmoid). The descriptor uses the old schema
/// (`batch_shape`, nested `dtype`) to exercise the compatibility rewrite.
pub fn write_legacy_model(path: &Path, kind: Recurrent, head_bias: f32) {
    let (class_name, rnn_name, units) = match kind {
        Recurrent::Lstm => ("LSTM", "lstm", 3usize),
        Recurrent::SimpleRnn => ("SimpleRNN", "simple_rnn", 3usize),
    };

    let mut rnn_config = json!({
        "name": rnn_name,
        "units": units,
        "activation": "tanh",
        "use_bias": true,
        "dtype": dtype_policy()
    });
    if matches!(kind, Recurrent::Lstm) {
        rnn_config["recurrent_activation"] = json!("sigmoid");
    }

    let config = json!({
        "class_name": "Sequential",
        "config": {
            "name": format!("model_{}", rnn_name),
            "layers": [
                {
                    "class_name": "InputLayer",
                    "config": {
                        "name": "input",
                        "batch_shape": [null, 200],
                        "dtype": dtype_policy()
                    }
                },
                {
                    "class_name": "Embedding",
                    "config": {
                        "name": "embedding",
                        "input_dim": 16,
                        "output_dim": 4,
                        "batch_shape": [null, 200],
                        "dtype": dtype_policy()
                    }
                },
                { "class_name": class_name, "config": rnn_config },
                {
                    "class_name": "Dropout",
                    "config": { "name": "dropout", "rate": 0.2, "dtype": dtype_policy() }
                },
                {
                    "class_name": "Dense",
                    "config": {
                        "name": "dense",
                        "units": 1,
                        "activation": "sigmoid",
                        "use_bias": true,
                        "dtype": dtype_policy()
                    }
                }
            ]
        }
    });

    let file = File::create(path).unwrap();
    write_string_attr(&file, "model_config", &config.to_string());

    let weights = file.create_group("model_weights").unwrap();

    let embedding = layer_group(&weights, "embedding");
    write_dataset(&embedding, "embeddings:0", &[16, 4], &vec![0.0; 16 * 4]);

    let rnn = layer_group(&weights, rnn_name);
    let gate_cols = match kind {
        Recurrent::Lstm => 4 * units,
        Recurrent::SimpleRnn => units,
    };
    write_dataset(&rnn, "kernel:0", &[4, gate_cols], &vec![0.0; 4 * gate_cols]);
    write_dataset(
        &rnn,
        "recurrent_kernel:0",
        &[units, gate_cols],
        &vec![0.0; units * gate_cols],
    );
    write_dataset(&rnn, "bias:0", &[gate_cols], &vec![0.0; gate_cols]);

    let dense = layer_group(&weights, "dense");
    write_dataset(&dense, "kernel:0", &[units, 1], &vec![0.0; units]);
    write_dataset(&dense, "bias:0", &[1], &[head_bias]);
}
