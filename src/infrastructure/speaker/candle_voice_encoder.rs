use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, lstm, LSTMConfig, Linear, Module, VarBuilder, LSTM, RNN};
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};

use crate::application::ports::{VoiceEncoder, VoiceEncoderError};
use crate::domain::VoiceEmbedding;

// GE2E-style speaker encoder: stacked LSTM over log-mel frames, projected
// and L2-normalized. The checkpoint repo ships `config.json` (whisper-style
// audio front-end), `melfilters.bytes` and `model.safetensors`.
const HIDDEN_SIZE: usize = 256;
const NUM_LAYERS: usize = 3;
const EMBEDDING_DIM: usize = 256;

// One 25ms analysis window at 16 kHz; anything shorter carries no voice.
const MIN_UTTERANCE_SAMPLES: usize = 400;

pub struct CandleVoiceEncoder {
    layers: Vec<LSTM>,
    projection: Linear,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleVoiceEncoder {
    pub fn new(model_id: &str) -> Result<Self, VoiceEncoderError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle voice encoder"
        );

        let api = Api::new().map_err(|e| VoiceEncoderError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let mel_bytes_path = repo
            .get("melfilters.bytes")
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
        if mel_bytes.len() < expected_len * 4 {
            return Err(VoiceEncoderError::ModelLoadFailed(format!(
                "mel filters file too small: {} bytes",
                mel_bytes.len()
            )));
        }
        let mel_filters: Vec<f32> = mel_bytes
            .chunks_exact(4)
            .take(expected_len)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let mut layers = Vec::with_capacity(NUM_LAYERS);
        for i in 0..NUM_LAYERS {
            let input_size = if i == 0 {
                config.num_mel_bins
            } else {
                HIDDEN_SIZE
            };
            let layer = lstm(
                input_size,
                HIDDEN_SIZE,
                LSTMConfig::default(),
                vb.pp(format!("lstm{}", i)),
            )
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("lstm{}: {}", i, e)))?;
            layers.push(layer);
        }

        let projection = linear(HIDDEN_SIZE, EMBEDDING_DIM, vb.pp("projection"))
            .map_err(|e| VoiceEncoderError::ModelLoadFailed(format!("projection: {}", e)))?;

        tracing::info!("Candle voice encoder loaded successfully");

        Ok(Self {
            layers,
            projection,
            config,
            device,
            mel_filters,
        })
    }

    fn encode(&self, pcm: &[f32]) -> Result<Vec<f32>, VoiceEncoderError> {
        let mel_data = m::audio::pcm_to_mel(&self.config, pcm, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        // (1, n_mel, n_frames) -> (1, n_frames, n_mel) for the recurrence
        let mut frames = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .and_then(|t| t.transpose(1, 2))
            .and_then(|t| t.contiguous())
            .map_err(|e| VoiceEncoderError::InferenceFailed(format!("mel tensor: {}", e)))?;

        let mut last_hidden = None;
        for layer in &self.layers {
            let states = layer
                .seq(&frames)
                .map_err(|e| VoiceEncoderError::InferenceFailed(format!("lstm: {}", e)))?;
            last_hidden = states.last().map(|s| s.h().clone());
            frames = layer
                .states_to_tensor(&states)
                .map_err(|e| VoiceEncoderError::InferenceFailed(format!("lstm states: {}", e)))?;
        }

        let hidden = last_hidden
            .ok_or_else(|| VoiceEncoderError::InferenceFailed("no frames encoded".to_string()))?;

        let projected = self
            .projection
            .forward(&hidden)
            .and_then(|t| t.relu())
            .map_err(|e| VoiceEncoderError::InferenceFailed(format!("projection: {}", e)))?;

        let mut values: Vec<f32> = projected
            .flatten_all()
            .and_then(|t| t.to_vec1())
            .map_err(|e| VoiceEncoderError::InferenceFailed(e.to_string()))?;

        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in values.iter_mut() {
                *x /= norm;
            }
        }

        Ok(values)
    }
}

#[async_trait]
impl VoiceEncoder for CandleVoiceEncoder {
    async fn embed_utterance(&self, pcm: &[f32]) -> Result<VoiceEmbedding, VoiceEncoderError> {
        if pcm.len() < MIN_UTTERANCE_SAMPLES {
            return Err(VoiceEncoderError::UtteranceTooShort { samples: pcm.len() });
        }

        let values = self.encode(pcm)?;
        Ok(VoiceEmbedding::new(values))
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}
