use image::RgbImage;

use crate::core::{
    color_map::{ColorMapLookUpTable, NamedColorMap},
    error::{FractalError, Result},
};

use super::mandelbrot::EscapeCountGrid;

/// `count / max_iter_count`, clipped to [0, 1]. Bounded samples saturate at 1.
pub fn normalized_escape_count(count: u32, max_iter_count: u32) -> f32 {
    ((count as f64) / (max_iter_count as f64)).clamp(0.0, 1.0) as f32
}

/**
 * Color every escape count through a precomputed color map table. Pixel `(x, y)` of
 * the image is the sample at column `x`, row `y` of the grid; the raw buffer
 * (`RgbImage::into_raw`) is the `height x width x 3` array of 8-bit channels.
 */
pub fn colorize_with(
    counts: &EscapeCountGrid,
    max_iter_count: u32,
    color_map: &ColorMapLookUpTable,
) -> Result<RgbImage> {
    if max_iter_count == 0 {
        return Err(FractalError::invalid_parameter(
            "max_iter_count must be positive",
        ));
    }
    let to_u32 = |value: usize| {
        u32::try_from(value).map_err(|_| {
            FractalError::invalid_parameter(format!("image dimension {} is too large", value))
        })
    };
    let width = to_u32(counts.width())?;
    let height = to_u32(counts.height())?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let count = counts.get(y as usize, x as usize);
        color_map.compute_pixel(normalized_escape_count(count, max_iter_count))
    }))
}

/// Color a grid of escape counts using a color map selected by name.
pub fn colorize(
    counts: &EscapeCountGrid,
    max_iter_count: u32,
    color_map_name: &str,
) -> Result<RgbImage> {
    let color_map: NamedColorMap = color_map_name.parse()?;
    colorize_with(counts, max_iter_count, &color_map.lookup_table()?)
}
