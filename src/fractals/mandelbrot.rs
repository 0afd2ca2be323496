use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::{
    error::{FractalError, Result},
    image_utils::SampleGrid,
    viewport::Viewport,
};

pub const DEFAULT_MAX_ITER_COUNT: u32 = 300;
pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceParams {
    /// Samples that have not escaped after this many iterations are treated as bounded.
    #[serde(default = "default_max_iter_count")]
    pub max_iter_count: u32,
    /// A sample escapes once `|z| > escape_radius`.
    #[serde(default = "default_escape_radius")]
    pub escape_radius: f64,
}

fn default_max_iter_count() -> u32 {
    DEFAULT_MAX_ITER_COUNT
}

fn default_escape_radius() -> f64 {
    DEFAULT_ESCAPE_RADIUS
}

impl Default for ConvergenceParams {
    fn default() -> Self {
        ConvergenceParams {
            max_iter_count: DEFAULT_MAX_ITER_COUNT,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
        }
    }
}

impl ConvergenceParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter_count == 0 {
            return Err(FractalError::invalid_parameter(
                "max_iter_count must be positive",
            ));
        }
        if !(self.escape_radius.is_finite() && self.escape_radius > 0.0) {
            return Err(FractalError::invalid_parameter(format!(
                "escape_radius must be positive and finite, got {}",
                self.escape_radius
            )));
        }
        Ok(())
    }
}

/**
 * Escape counts for every sample of a grid, stored row-major: row `j` holds the
 * samples with imaginary part `im[j]` (starting at `y_min`), column `i` the samples
 * with real part `re[i]`. Each count is on `[0, max_iter_count]`, where
 * `max_iter_count` marks a sample that never escaped.
 */
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EscapeCountGrid {
    width: usize,
    height: usize,
    max_iter_count: u32,
    counts: Vec<u32>,
}

impl EscapeCountGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`, i.e. `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn max_iter_count(&self) -> u32 {
        self.max_iter_count
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.counts[row * self.width + col]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, u32> {
        self.counts.chunks(self.width)
    }

    /// Number of samples that stayed bounded for every iteration.
    pub fn bounded_count(&self) -> usize {
        self.counts
            .iter()
            .filter(|&&count| count == self.max_iter_count)
            .count()
    }
}

/**
 * Vectorized state of the quadratic map `z := z*z + c` for a whole grid of constant
 * terms `c`, all starting from `z = 0`. Samples leave the active set the first time
 * `|z|` exceeds the escape radius and are never updated again.
 */
#[derive(Clone, Debug)]
pub struct EscapeTimeSequence {
    constant_terms: Vec<Complex64>,
    values: Vec<Complex64>,
    active: Vec<usize>,
    counts: Vec<u32>,
    iter_count: u32,
}

impl EscapeTimeSequence {
    pub fn new(constant_terms: Vec<Complex64>) -> EscapeTimeSequence {
        let sample_count = constant_terms.len();
        EscapeTimeSequence {
            constant_terms,
            values: vec![Complex64::new(0.0, 0.0); sample_count],
            active: (0..sample_count).collect(),
            counts: vec![0; sample_count],
            iter_count: 0,
        }
    }

    pub fn iter_count(&self) -> u32 {
        self.iter_count
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// One iteration over the active set. Samples that escape on this step record
    /// the index of this iteration (not the number of steps taken).
    pub fn step(&mut self, escape_radius: f64) {
        let iteration = self.iter_count;
        let values = &mut self.values;
        let constant_terms = &self.constant_terms;
        let counts = &mut self.counts;
        self.active.retain(|&index| {
            let z = values[index];
            let z = z * z + constant_terms[index];
            values[index] = z;
            if z.norm() > escape_radius {
                counts[index] = iteration;
                false
            } else {
                true
            }
        });
        self.iter_count += 1;
    }

    /// Iterate until `max_iter_count` steps have run or every sample has escaped.
    /// Skipping the remaining steps once the active set is empty does not change any count.
    pub fn step_until_settled(&mut self, max_iter_count: u32, escape_radius: f64) {
        while self.iter_count < max_iter_count && !self.active.is_empty() {
            self.step(escape_radius);
        }
    }

    /// Samples still active are bounded and receive `max_iter_count`.
    pub fn into_counts(mut self, max_iter_count: u32) -> Vec<u32> {
        for &index in self.active.iter() {
            self.counts[index] = max_iter_count;
        }
        self.counts
    }
}

/// Escape-time counts for the Mandelbrot set over `viewport`, sampled on a
/// `width` x `height` grid. Pure function of its inputs.
#[tracing::instrument(level = "debug", skip(viewport, convergence))]
pub fn escape_counts(
    viewport: &Viewport,
    width: usize,
    height: usize,
    convergence: &ConvergenceParams,
) -> Result<EscapeCountGrid> {
    let grid = SampleGrid::new(viewport, width, height)?;
    convergence.validate()?;

    let mut sequence = EscapeTimeSequence::new(grid.points());
    sequence.step_until_settled(convergence.max_iter_count, convergence.escape_radius);
    tracing::debug!(
        iterations = sequence.iter_count(),
        bounded = sequence.active_count(),
        "escape time iteration finished"
    );

    Ok(EscapeCountGrid {
        width,
        height,
        max_iter_count: convergence.max_iter_count,
        counts: sequence.into_counts(convergence.max_iter_count),
    })
}

/// Flat-argument form of [`escape_counts`].
#[allow(clippy::too_many_arguments)]
pub fn mandelbrot_counts(
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
    max_iter_count: u32,
    escape_radius: f64,
) -> Result<EscapeCountGrid> {
    escape_counts(
        &Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        },
        width,
        height,
        &ConvergenceParams {
            max_iter_count,
            escape_radius,
        },
    )
}
