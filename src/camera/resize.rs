use std::path::Path;

use anyhow::{Context, Result};
use image::{GenericImageView, ImageFormat};

pub const SNAPSHOT_MAX_WIDTH: u32 = 1920;
pub const SNAPSHOT_MAX_HEIGHT: u32 = 1080;

/// Re-encode `source` as JPEG at `dest`, downscaled to fit 1920x1080 while
/// preserving aspect ratio. Images already inside the bounds are never
/// upscaled.
pub fn shrink_to_bounds(source: &Path, dest: &Path) -> Result<(u32, u32)> {
    let image = image::open(source)
        .with_context(|| format!("failed to decode snapshot {}", source.display()))?;
    let (width, height) = image.dimensions();
    let image = if width > SNAPSHOT_MAX_WIDTH || height > SNAPSHOT_MAX_HEIGHT {
        image.thumbnail(SNAPSHOT_MAX_WIDTH, SNAPSHOT_MAX_HEIGHT)
    } else {
        image
    };
    image
        .save_with_format(dest, ImageFormat::Jpeg)
        .with_context(|| format!("failed to write snapshot {}", dest.display()))?;
    Ok(image.dimensions())
}
