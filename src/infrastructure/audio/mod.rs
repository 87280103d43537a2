mod pcm_decoder;
mod upload_spool;

pub use pcm_decoder::{SymphoniaAudioDecoder, TARGET_SAMPLE_RATE};
pub use upload_spool::{StagedUpload, UploadSpool, UploadSpoolError};
