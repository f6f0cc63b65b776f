use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{error, info};

use crate::{
    config::Config, model::Sequential, tokenizer, vocab::Vocabulary, Error, Result, Tensor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelPrediction {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub score: f32,
}

impl ModelPrediction {
    /// Thresholds a raw sigmoid score: strictly above 0.5 is positive, so a
    /// score of exactly 0.5 classifies as negative.
    pub fn from_score(score: f32) -> Self {
        let (sentiment, confidence) = if score > 0.5 {
            (Sentiment::Positive, score)
        } else {
            (Sentiment::Negative, 1.0 - score)
        };
        Self {
            sentiment,
            confidence,
            score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictReply {
    pub lstm: ModelPrediction,
    pub rnn: ModelPrediction,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    pub models_loaded: bool,
    pub error: Option<String>,
}

struct LoadedModels {
    lstm: Sequential,
    rnn: Sequential,
    vocab: Vocabulary,
}

#[derive(Default)]
struct ServiceState {
    models: Option<Arc<LoadedModels>>,
    last_error: Option<String>,
}

/// Owns the two models, the vocabulary and the last load error. Everything
/// is loaded at most once; the mutex keeps concurrent first requests from
/// racing duplicate loads. A failed load is recorded and re-attempted on
/// the next request that finds the models absent.
pub struct SentimentService {
    lstm_path: PathBuf,
    rnn_path: PathBuf,
    word_index_path: PathBuf,
    state: Mutex<ServiceState>,
}

impl SentimentService {
    pub fn new(config: &Config) -> Self {
        Self {
            lstm_path: config.models_dir.join("model_lstm.h5"),
            rnn_path: config.models_dir.join("model_rnn.h5"),
            word_index_path: config.models_dir.join("imdb_word_index.json"),
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Eagerly loads models at startup; the error is recorded for /health
    /// and the caller decides whether to keep serving.
    pub fn warm_up(&self) -> Result<()> {
        self.ensure_loaded().map(|_| ())
    }

    pub fn predict(&self, review: &str) -> Result<PredictReply> {
        if review.is_empty() {
            return Err(Error::Validation("No review text provided".to_string()));
        }

        let models = self.ensure_loaded()?;

        let sequence = tokenizer::encode(review, &models.vocab);
        let input = Tensor::from_vec(
            sequence.into_iter().map(|id| id as f32).collect(),
            &[1, tokenizer::MAX_SEQUENCE_LENGTH],
        )?;

        let lstm_score = models.lstm.predict(&input)?.scalar()?;
        let rnn_score = models.rnn.predict(&input)?.scalar()?;

        Ok(PredictReply {
            lstm: ModelPrediction::from_score(lstm_score),
            rnn: ModelPrediction::from_score(rnn_score),
        })
    }

    pub fn health(&self) -> HealthReply {
        // loading is attempted here too, so /health reflects real status
        let _ = self.ensure_loaded();

        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        HealthReply {
            status: "ok",
            models_loaded: state.models.is_some(),
            error: state.last_error.clone(),
        }
    }

    fn ensure_loaded(&self) -> Result<Arc<LoadedModels>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(models) = &state.models {
            return Ok(Arc::clone(models));
        }

        match self.load_all() {
            Ok(models) => {
                state.last_error = None;
                let models = Arc::new(models);
                state.models = Some(Arc::clone(&models));
                Ok(models)
            }
            Err(e) => {
                error!(error = %e, "model load failed");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn load_all(&self) -> Result<LoadedModels> {
        let lstm = Sequential::load(&self.lstm_path)?;
        info!(model = lstm.name(), "LSTM model loaded");

        let rnn = Sequential::load(&self.rnn_path)?;
        info!(model = rnn.name(), "RNN model loaded");

        let vocab = Vocabulary::from_word_index_file(&self.word_index_path)?;
        info!(words = vocab.len(), "vocabulary ready");

        Ok(LoadedModels { lstm, rnn, vocab })
    }
}
