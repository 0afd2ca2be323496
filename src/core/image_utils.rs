use std::path::Path;

use image::RgbImage;
use iter_num_tools::lin_space;
use num::complex::Complex64;

use crate::core::{
    error::{FractalError, Result},
    viewport::Viewport,
};

/// Rejects empty images before any buffers are allocated.
pub fn validate_resolution(resolution: &nalgebra::Vector2<u32>) -> Result<()> {
    if resolution[0] == 0 || resolution[1] == 0 {
        return Err(FractalError::invalid_parameter(format!(
            "image resolution must be positive, got {} x {}",
            resolution[0], resolution[1]
        )));
    }
    Ok(())
}

/// `n` evenly spaced values covering `[lower, upper]`, both ends included.
/// A single sample sits at `lower`.
pub fn linear_samples(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => lin_space(lower..=upper, n).collect(),
    }
}

/**
 * Complex sample points laid over a viewport: `width` points along the real axis
 * and `height` points along the imaginary axis. Row `j` holds the samples with
 * imaginary part `im[j]`, starting at `y_min`; column `i` has real part `re[i]`.
 */
#[derive(Clone, Debug)]
pub struct SampleGrid {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

impl SampleGrid {
    pub fn new(viewport: &Viewport, width: usize, height: usize) -> Result<SampleGrid> {
        viewport.validate()?;
        if width == 0 || height == 0 {
            return Err(FractalError::invalid_parameter(format!(
                "grid resolution must be positive, got {} x {}",
                width, height
            )));
        }
        Ok(SampleGrid {
            re: linear_samples(viewport.x_min, viewport.x_max, width),
            im: linear_samples(viewport.y_min, viewport.y_max, height),
        })
    }

    pub fn width(&self) -> usize {
        self.re.len()
    }

    pub fn height(&self) -> usize {
        self.im.len()
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point(&self, row: usize, col: usize) -> Complex64 {
        Complex64::new(self.re[col], self.im[row])
    }

    /// Row-major (row = imaginary index) list of all sample points.
    pub fn points(&self) -> Vec<Complex64> {
        self.im
            .iter()
            .flat_map(|&im| self.re.iter().map(move |&re| Complex64::new(re, im)))
            .collect()
    }

    /// `(row, col)` of the sample closest to `point`.
    pub fn nearest_index(&self, point: Complex64) -> (usize, usize) {
        (nearest(&self.im, point.im), nearest(&self.re, point.re))
    }
}

fn nearest(samples: &[f64], value: f64) -> usize {
    samples
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - value).abs().total_cmp(&(*b - value).abs()))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

pub fn write_image_to_file(filename: &Path, image: &RgbImage) -> image::ImageResult<()> {
    image.save(filename)?;
    tracing::info!("Wrote image file to: {}", filename.display());
    Ok(())
}
