/// Lower bound for the device pixel ratio; some embedded browsers report 0.
pub const MIN_DEVICE_PIXEL_RATIO: f32 = 1.0;

/// Upper bound on either surface dimension, in device pixels.
pub const MAX_SURFACE_DIM: u32 = 8192;

/// Prefix of every exported signature.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// What a browser returns from `toDataURL` on a zero-sized canvas.
pub const EMPTY_DATA_URL: &str = "data:,";
