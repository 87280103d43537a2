use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{AudioDecoder, SpeechToText, TranscriptionError};
use crate::domain::TranscriptSegment;
use crate::infrastructure::audio::SymphoniaAudioDecoder;

// Whisper emits timestamp tokens on a 20ms grid.
const TIMESTAMP_STEP: f64 = 0.02;
const MAX_DECODE_TOKENS: usize = 224;
const CHUNK_SECONDS: f64 = (m::N_SAMPLES / m::SAMPLE_RATE) as f64;

pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle Whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }
}

#[async_trait]
impl SpeechToText for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let pcm = SymphoniaAudioDecoder
            .decode(audio_data)
            .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))?;

        let chunk_samples = m::N_SAMPLES;
        let mut mel_tensors = Vec::new();

        for (i, chunk) in pcm.chunks(chunk_samples).enumerate() {
            let chunk_secs = chunk.len() as f64 / m::SAMPLE_RATE as f64;
            let samples = if chunk.len() < chunk_samples {
                let mut padded = chunk.to_vec();
                padded.resize(chunk_samples, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })?;

            mel_tensors.push((i, chunk_secs, mel_tensor));
        }

        let mut model = self.model.lock().await;
        let mut segments: Vec<TranscriptSegment> = Vec::new();

        for (i, chunk_secs, mel_tensor) in mel_tensors {
            tracing::debug!(chunk = i, "Transcribing audio chunk");
            let offset = i as f64 * CHUNK_SECONDS;
            let chunk_segments =
                decode_chunk(&mut model, &self.tokenizer, &self.device, &mel_tensor, chunk_secs)?;

            for (start, end, text) in chunk_segments {
                segments.push(TranscriptSegment::new(offset + start, offset + end, text));
            }
        }

        tracing::info!(
            segments = segments.len(),
            "Local Whisper transcription completed"
        );

        Ok(segments)
    }
}

/// Greedy decode of one 30s chunk, keeping timestamp tokens so segment
/// boundaries come from the model instead of chunk edges.
fn decode_chunk(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    chunk_secs: f64,
) -> Result<Vec<(f64, f64, String)>, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;
    let timestamp_begin = token_id(tokenizer, "<|0.00|>")?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

    // English-only checkpoints ship without language/task tokens.
    let mut tokens = vec![sot_token];
    if let Some(lang) = tokenizer.token_to_id("<|en|>") {
        tokens.push(lang);
    }
    if let Some(transcribe) = tokenizer.token_to_id(m::TRANSCRIBE_TOKEN) {
        tokens.push(transcribe);
    }
    let prefix_len = tokens.len();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prefix_len)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(
                &decoder_output
                    .squeeze(0)
                    .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?,
            )
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;
        let last_logits = logits
            .get(seq_len - 1)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let next_token = last_logits
            .argmax(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .to_scalar::<u32>()
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);
    }

    model.reset_kv_cache();

    collect_segments(
        tokenizer,
        &tokens[prefix_len..],
        timestamp_begin,
        chunk_secs,
    )
}

/// Walks decoded tokens, converting timestamp tokens into segment
/// boundaries. A chunk that yields no timestamps becomes one segment.
fn collect_segments(
    tokenizer: &Tokenizer,
    tokens: &[u32],
    timestamp_begin: u32,
    chunk_secs: f64,
) -> Result<Vec<(f64, f64, String)>, TranscriptionError> {
    let mut segments = Vec::new();
    let mut current_start: Option<f64> = None;
    let mut buffer: Vec<u32> = Vec::new();

    let mut flush = |start: f64, end: f64, buffer: &mut Vec<u32>| -> Result<(), TranscriptionError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let text = tokenizer
            .decode(buffer.as_slice(), true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;
        let text = text.trim().to_string();
        if !text.is_empty() {
            segments.push((start, end.min(chunk_secs), text));
        }
        buffer.clear();
        Ok(())
    };

    for &token in tokens {
        if token >= timestamp_begin {
            let time = (token - timestamp_begin) as f64 * TIMESTAMP_STEP;
            match current_start {
                Some(start) => {
                    flush(start, time, &mut buffer)?;
                    current_start = None;
                }
                None => {
                    current_start = Some(time);
                }
            }
        } else {
            buffer.push(token);
        }
    }

    flush(current_start.unwrap_or(0.0), chunk_secs, &mut buffer)?;

    Ok(segments)
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
