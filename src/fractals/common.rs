use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::NamedColorMap, error::Result, image_utils::validate_resolution,
    viewport::Viewport,
};

use super::{
    colorize::colorize_with,
    mandelbrot::{escape_counts, ConvergenceParams},
    zoom::ZoomParams,
};

/// Contents of a parameter file, tagged by what it renders.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum FractalParams {
    MandelbrotFrame(Box<MandelbrotFrameParams>),
    MandelbrotZoom(Box<ZoomParams>),
}

/// A single still image of the Mandelbrot set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MandelbrotFrameParams {
    pub resolution: nalgebra::Vector2<u32>,
    pub viewport: Viewport,
    #[serde(default)]
    pub convergence: ConvergenceParams,
    pub color_map: NamedColorMap,
}

impl MandelbrotFrameParams {
    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        validate_resolution(&self.resolution)?;
        self.convergence.validate()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render(&self) -> Result<RgbImage> {
        validate_resolution(&self.resolution)?;
        let counts = escape_counts(
            &self.viewport,
            self.resolution[0] as usize,
            self.resolution[1] as usize,
            &self.convergence,
        )?;
        tracing::debug!(bounded = counts.bounded_count(), "escape counts computed");
        colorize_with(
            &counts,
            self.convergence.max_iter_count,
            &self.color_map.lookup_table()?,
        )
    }
}
