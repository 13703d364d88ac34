//! Session configuration.
//!
//! Resolved once, from the embedding resource's metadata plus the UI
//! layer's init response, and immutable afterwards.

use std::collections::HashMap;
use std::num::NonZeroU32;

use emu_core::MetadataSource;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::ConfigError;

/// Metadata field names.
pub mod keys {
    /// Runtime texture dictionary name (required, non-empty).
    pub const TEXTURE_DICT: &str = "txd_name";
    /// Runtime texture name (required, non-empty).
    pub const TEXTURE_NAME: &str = "txn_name";
    /// Target emulated frame rate (required, positive integer).
    pub const TARGET_FPS: &str = "target_fps";
    /// Show the controls overlay (`"true"` to enable).
    pub const SHOW_CONTROLS: &str = "show_controls";
}

/// Sample rate used when the init response does not carry one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Whole milliseconds per emulated frame. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime(NonZeroU32);

impl FrameTime {
    /// Frame time for a target frame rate: `floor(1000 / fps)`.
    pub fn from_fps(fps: i64) -> Result<Self, ConfigError> {
        if fps <= 0 {
            return Err(ConfigError::NonPositiveFrameRate(fps));
        }
        u32::try_from(1000 / fps)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ConfigError::FrameRateTooHigh(fps))
    }

    #[must_use]
    pub fn from_millis(ms: u32) -> Option<Self> {
        NonZeroU32::new(ms).map(Self)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0.get() as i64
    }
}

/// The UI layer's answer to an init request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitPayload {
    /// Host audio sample rate in Hz, forwarded to the core.
    pub sample_rate: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInitPayload {
    #[serde(default)]
    sample_rate: Option<f64>,
}

impl InitPayload {
    /// Parse the JSON init response, e.g. `{"sampleRate": 48000}`.
    ///
    /// Browsers report the sample rate as a float; it is rounded to whole Hz.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawInitPayload = serde_json::from_str(text)?;
        let Some(rate) = raw.sample_rate else {
            return Ok(Self::default());
        };
        if !rate.is_finite() || rate < 1.0 || rate > f64::from(u32::MAX) {
            return Err(ConfigError::InvalidSampleRate(rate));
        }
        Ok(Self {
            sample_rate: rate.round() as u32,
        })
    }
}

impl Default for InitPayload {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Resolved session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub texture_dict: String,
    pub texture_name: String,
    pub frame_time: FrameTime,
    pub controls_visible: bool,
    pub sample_rate: u32,
}

impl SessionConfig {
    /// Read and validate every field.
    ///
    /// Pure: nothing is created on the presentation surface here, so a bad
    /// field fails before any resource exists.
    pub fn resolve(
        metadata: &dyn MetadataSource,
        payload: InitPayload,
    ) -> Result<Self, ConfigError> {
        let texture_dict = required_name(metadata, keys::TEXTURE_DICT)?;
        let texture_name = required_name(metadata, keys::TEXTURE_NAME)?;

        let fps_text = metadata
            .metadata(keys::TARGET_FPS)
            .ok_or(ConfigError::Missing(keys::TARGET_FPS))?;
        let fps: i64 = fps_text
            .trim()
            .parse()
            .map_err(|_| ConfigError::MalformedFrameRate(fps_text.clone()))?;
        let frame_time = FrameTime::from_fps(fps)?;

        let controls_visible = metadata
            .metadata(keys::SHOW_CONTROLS)
            .is_some_and(|v| v == "true");

        let config = Self {
            texture_dict,
            texture_name,
            frame_time,
            controls_visible,
            sample_rate: payload.sample_rate,
        };
        log::debug!("resolved session config: {config:?}");
        Ok(config)
    }
}

fn required_name(metadata: &dyn MetadataSource, key: &'static str) -> Result<String, ConfigError> {
    match metadata.metadata(key) {
        None => Err(ConfigError::Missing(key)),
        Some(value) if value.is_empty() => Err(ConfigError::Empty(key)),
        Some(value) => Ok(value),
    }
}

/// Resource metadata held in memory, e.g. loaded from a JSON manifest.
///
/// Scalar values are kept as the strings a resource manifest would carry:
/// `60` and `"60"` both read back as `"60"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceManifest {
    fields: HashMap<String, String>,
}

impl ResourceManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of metadata fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let object: HashMap<String, JsonValue> = serde_json::from_str(text)?;
        let mut fields = HashMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                JsonValue::String(s) => s,
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                _ => return Err(ConfigError::UnsupportedValue(key)),
            };
            fields.insert(key, text);
        }
        Ok(Self { fields })
    }

    /// Set a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }
}

impl MetadataSource for ResourceManifest {
    fn metadata(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }
}
