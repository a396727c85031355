//! Shared configuration for Read & Sign
//!
//! This crate is the single source of truth for stroke styling, dialog
//! timing, resize debouncing, backend selection and user-facing text. Every
//! section deserializes with defaults, so a host only needs to supply the
//! values it wants to override.

mod messages;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use messages::Messages;

/// Default stroke width in logical (CSS) pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 2.5;

/// Default stroke colour
pub const DEFAULT_STROKE_COLOR: &str = "#1f2937";

/// Seconds the success dialog stays open before closing itself
pub const DEFAULT_AUTO_CLOSE_SECS: u32 = 30;

/// Quiet period before a burst of resize events is applied
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Latency of the simulated backend
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 1500;

/// Offset between the Gregorian and Thai Buddhist-era year
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid colour {0:?}: expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Signature canvas styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Stroke width in logical pixels
    pub stroke_width: f32,
    /// Stroke colour as a hex string
    pub stroke_color: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
        }
    }
}

/// Success dialog behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub auto_close_secs: u32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            auto_close_secs: DEFAULT_AUTO_CLOSE_SECS,
        }
    }
}

/// Remote submission settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// HTTP endpoint receiving the snapshot as JSON. `None` selects the
    /// simulated backend.
    pub endpoint: Option<String>,
    pub simulated_delay_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
        }
    }
}

/// Date formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Show years in the Thai Buddhist era (Gregorian + 543)
    pub buddhist_era: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { buddhist_era: true }
    }
}

/// Top-level widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadSignConfig {
    pub canvas: CanvasConfig,
    pub dialog: DialogConfig,
    pub resize_debounce_ms: u64,
    pub submit: SubmitConfig,
    pub locale: LocaleConfig,
    pub messages: Messages,
}

impl Default for ReadSignConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            dialog: DialogConfig::default(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            submit: SubmitConfig::default(),
            locale: LocaleConfig::default(),
            messages: Messages::default(),
        }
    }
}

impl ReadSignConfig {
    /// Parse a JSON document, falling back to defaults for missing keys
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        // Reject a bad colour up front rather than at first paint
        config.stroke_rgba()?;
        Ok(config)
    }

    /// Stroke colour as straight RGBA bytes
    pub fn stroke_rgba(&self) -> Result<[u8; 4], ConfigError> {
        parse_hex_color(&self.canvas.stroke_color)
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Result<[u8; 4], ConfigError> {
    let invalid = || ConfigError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if digits.len() == 8 { channel(6)? } else { 0xFF };
    Ok([channel(0)?, channel(2)?, channel(4)?, alpha])
}
