//! Signature presence detection
//!
//! The draw-activity flag is the fast path. When it is unset the rendered
//! pixels are scanned for any non-zero alpha. Read failures count as "no
//! signature" and are only logged.

use tracing::warn;

use crate::pipeline::SignaturePad;
use crate::surface::PixelSource;

/// True if `has_drawn` is set or `source` holds any non-transparent pixel
pub fn detect_signature<S: PixelSource + ?Sized>(has_drawn: bool, source: &S) -> bool {
    if has_drawn {
        return true;
    }
    scan_for_ink(source)
}

/// Scan the alpha channel of `source`
pub fn scan_for_ink<S: PixelSource + ?Sized>(source: &S) -> bool {
    match source.read_rgba() {
        Ok(bytes) => bytes.chunks_exact(4).any(|pixel| pixel[3] != 0),
        Err(e) => {
            warn!("Could not check canvas data: {}", e);
            false
        }
    }
}

impl SignaturePad {
    /// Whether the pad holds a signature.
    ///
    /// The fallback scan is memoized per surface revision, so repeated
    /// validation of a blank pad costs one scan per mutation.
    pub fn has_signature(&self) -> bool {
        if self.has_drawn {
            return true;
        }

        let revision = self.surface.revision();
        if let Some((cached_revision, present)) = self.scan_cache.get() {
            if cached_revision == revision {
                return present;
            }
        }

        let present = scan_for_ink(&self.surface);
        self.scan_cache.set(Some((revision, present)));
        present
    }
}
