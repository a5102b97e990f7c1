use anyhow::Context;
use log::info;
use std::path::Path;

/// Encodes a row-major RGB byte buffer as a PNG file.
///
/// Encoding failure leaves the rendered buffer untouched in the caller's
/// hands; it is up to the caller to decide how loudly to complain.
pub fn save_png(pixels: &[u8], width: u32, height: u32, path: &Path) -> anyhow::Result<()> {
    image::save_buffer(path, pixels, width, height, image::ColorType::Rgb8)
        .with_context(|| format!("failed to write image to {}", path.display()))?;

    info!("image written to {}", path.display());
    Ok(())
}
