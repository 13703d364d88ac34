//! PNG screenshots of the presented frame.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use emu_core::CoreFactory;
use thiserror::Error;

use crate::framebuffer::{FB_HEIGHT, FB_WIDTH, RgbaFrame};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("png encoding error: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Save an RGBA frame as a 256×240 PNG.
pub fn save_rgba(frame: &RgbaFrame, path: &Path) -> Result<(), CaptureError> {
    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, FB_WIDTH, FB_HEIGHT);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.as_bytes())?;
    Ok(())
}

/// Save what the session last uploaded to its texture.
pub fn save_screenshot<F: CoreFactory>(
    session: &Session<F>,
    path: &Path,
) -> Result<(), CaptureError> {
    save_rgba(session.presented(), path)?;
    log::info!("screenshot saved to {}", path.display());
    Ok(())
}
