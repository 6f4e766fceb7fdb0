//! PNG previews of generated levels

use crate::algorithm::level::GeneratedLevel;
use crate::io::configuration::MAX_PREVIEW_SCALE;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Render a level with one `scale` x `scale` block per tile
///
/// Colours come from each tile's semantic type; empty space is transparent.
///
/// # Errors
///
/// Returns `InvalidParameter` if `scale` is zero or above the preview limit, or
/// the scaled image would not fit in `u32` pixel dimensions
pub fn render_level(level: &GeneratedLevel, scale: u32) -> Result<RgbaImage> {
    if scale == 0 || scale > MAX_PREVIEW_SCALE {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("must be between 1 and {MAX_PREVIEW_SCALE}"),
        ));
    }

    let scaled = |tiles: usize| u32::try_from(tiles).ok()?.checked_mul(scale);
    let (Some(width), Some(height)) = (scaled(level.width()), scaled(level.height())) else {
        return Err(invalid_parameter(
            "preview size",
            &format!("{}x{}", level.width(), level.height()),
            &format!("does not fit in u32 pixels at scale {scale}"),
        ));
    };

    let img = ImageBuffer::from_fn(width, height, |px, py| {
        let color = level
            .get((px / scale) as usize, (py / scale) as usize)
            .map_or([0, 0, 0, 0], |visual| visual.block_type.preview_color());
        Rgba(color)
    });

    Ok(img)
}

/// Export a level preview as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The scale is invalid
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_level_as_png(level: &GeneratedLevel, scale: u32, output_path: &Path) -> Result<()> {
    let img = render_level(level, scale)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
