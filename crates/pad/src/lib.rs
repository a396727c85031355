//! Read & Sign signature pad
//!
//! This crate owns everything drawn on the signature canvas:
//! - [`sampler`] - Pointer/touch input to canvas-local points
//! - [`surface`] - RGBA8 pixel surface with a device-pixel-ratio transform
//! - [`segment`] - Anti-aliased round-capped line segments
//! - [`pipeline`] - [`SignaturePad`], the pen state machine tying it together
//! - [`presence`] - "Is anything signed?" query with pixel-scan fallback
//! - [`export`] - PNG data URI encoding

pub mod constants;
pub mod export;
pub mod pipeline;
pub mod presence;
pub mod sampler;
pub mod segment;
pub mod surface;
pub mod types;

pub use constants::*;
pub use export::*;
pub use pipeline::*;
pub use presence::*;
pub use sampler::*;
pub use surface::*;
pub use types::*;
