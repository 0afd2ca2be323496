pub mod colorize;
pub mod common;
pub mod mandelbrot;
pub mod zoom;
