//! Error types.
//!
//! Configuration and resource errors abort initialization; no session is
//! created. Session errors come out of `run` and out of a tick.

use emu_core::TextureId;
use thiserror::Error;

pub type Result<T, E = HostError> = std::result::Result<T, E>;

/// Invalid or missing resource metadata.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("metadata field `{0}` is missing")]
    Missing(&'static str),
    #[error("metadata field `{0}` must be a non-empty string")]
    Empty(&'static str),
    #[error("target_fps must be a positive integer, got `{0}`")]
    MalformedFrameRate(String),
    #[error("target_fps must be a positive integer, got {0}")]
    NonPositiveFrameRate(i64),
    #[error("target_fps {0} leaves less than one millisecond per frame")]
    FrameRateTooHigh(i64),
    #[error("sample rate must be a positive number, got {0}")]
    InvalidSampleRate(f64),
    #[error("metadata field `{0}` must be a string, number or boolean")]
    UnsupportedValue(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The presentation surface refused to create a resource.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("failed to create texture dictionary `{0}`")]
    Dictionary(String),
    #[error("failed to create texture `{name}` in dictionary `{dictionary}`")]
    Texture { dictionary: String, name: String },
}

/// Failures while a session runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("program image rejected: {0}")]
    ProgramRejected(String),
    #[error("pixel upload to texture {0:?} failed")]
    UploadFailed(TextureId),
}

/// Any error surfaced through [`NesHost`](crate::NesHost).
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
