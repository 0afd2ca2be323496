//! Escape-time rendering of the Mandelbrot set, with animated zooms between viewports.
//!
//! The kernel ([`fractals::mandelbrot::escape_counts`]) turns a viewport into a grid of
//! escape counts, [`fractals::colorize::colorize`] maps those counts through a named color
//! map into an RGB image, and [`fractals::zoom::ZoomAnimation`] drives both once per frame.

pub mod cli;
pub mod core;
pub mod fractals;

pub use crate::core::error::{FractalError, Result};
