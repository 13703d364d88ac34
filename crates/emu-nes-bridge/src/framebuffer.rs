//! Native scanout buffer and its RGBA conversion.
//!
//! The core hands over one packed `0x00RRGGBB` value per pixel. The host
//! texture wants four bytes per pixel: red, green, blue, alpha. Both buffers
//! are fixed at 256×240 and allocated once per session.

use std::fmt;

use emu_core::FrameSink;

/// NES framebuffer width in pixels.
pub const FB_WIDTH: u32 = 256;
/// NES framebuffer height in pixels.
pub const FB_HEIGHT: u32 = 240;
/// Pixels per frame.
pub const FB_PIXELS: usize = (FB_WIDTH * FB_HEIGHT) as usize;
/// Bytes per converted frame.
pub const RGBA_LEN: usize = FB_PIXELS * 4;

/// The last completed frame in the core's native format.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Box<[u32]>,
}

impl FrameBuffer {
    /// An all-black frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: vec![0; FB_PIXELS].into_boxed_slice(),
        }
    }

    /// Wrap an existing scanout. `None` unless it holds exactly 256×240 pixels.
    #[must_use]
    pub fn from_pixels(pixels: Vec<u32>) -> Option<Self> {
        (pixels.len() == FB_PIXELS).then(|| Self {
            pixels: pixels.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Convert into a freshly allocated RGBA frame.
    #[must_use]
    pub fn to_rgba(&self) -> RgbaFrame {
        let mut out = RgbaFrame::new();
        convert(self, &mut out);
        out
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &FB_WIDTH)
            .field("height", &FB_HEIGHT)
            .finish_non_exhaustive()
    }
}

/// Only whole frames are taken. A scanout of any other size is dropped and
/// the previous frame stays in place.
impl FrameSink for FrameBuffer {
    fn frame(&mut self, pixels: &[u32]) {
        if pixels.len() != FB_PIXELS {
            log::warn!(
                "dropping frame of {} pixels, expected {FB_PIXELS}",
                pixels.len()
            );
            return;
        }
        self.pixels.copy_from_slice(pixels);
    }
}

/// Interleaved RGBA bytes ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    bytes: Box<[u8]>,
}

impl RgbaFrame {
    /// A zeroed frame (fully transparent black until first conversion).
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; RGBA_LEN].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for RgbaFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RgbaFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RgbaFrame")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Convert a native frame into RGBA, overwriting every byte of `dst`.
pub fn convert(src: &FrameBuffer, dst: &mut RgbaFrame) {
    for (out, &argb) in dst.bytes.chunks_exact_mut(4).zip(src.pixels.iter()) {
        out[0] = ((argb >> 16) & 0xFF) as u8;
        out[1] = ((argb >> 8) & 0xFF) as u8;
        out[2] = (argb & 0xFF) as u8;
        out[3] = 0xFF;
    }
}
