use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{ColorMapLookUpTable, NamedColorMap},
    error::Result,
    file_io::{serialize_to_json, FilePrefix},
    image_utils::{validate_resolution, write_image_to_file},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColorSwatchParams {
    pub resolution: nalgebra::Vector2<u32>,
    pub color_map: NamedColorMap,
}

/// Horizontal gradient: the left column is query 0, the right column query 1.
pub fn color_swatch_image(
    resolution: &nalgebra::Vector2<u32>,
    color_map: &ColorMapLookUpTable,
) -> Result<RgbImage> {
    validate_resolution(resolution)?;
    let last_column = (resolution[0].max(2) - 1) as f32;
    Ok(RgbImage::from_fn(resolution[0], resolution[1], |x, _| {
        color_map.compute_pixel((x as f32) / last_column)
    }))
}

pub fn generate_color_swatch(
    params: &ColorSwatchParams,
    file_prefix: FilePrefix,
) -> anyhow::Result<()> {
    serialize_to_json(&file_prefix.with_suffix(".json"), params)?;
    let image = color_swatch_image(&params.resolution, &params.color_map.lookup_table()?)?;
    write_image_to_file(&file_prefix.with_suffix(".png"), &image)?;
    Ok(())
}
