//! Image file output

use anyhow::{Context, Result};
use image::RgbImage;
use std::path::PathBuf;
use wf3d_core::Frame;

/// Encode `frame` to `name`, choosing the format from the extension.
///
/// A name without an extension is saved as PNG. Returns the path written.
pub fn save_frame(frame: &Frame, name: &str) -> Result<PathBuf> {
    let mut path = PathBuf::from(name);
    if path.extension().is_none() {
        path.set_extension("png");
    }

    let image = RgbImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.to_rgb_bytes(),
    )
    .context("frame buffer does not match its dimensions")?;

    image
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
