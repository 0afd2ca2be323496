use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::{
    error::{FractalError, Result},
    interpolation::lerp,
};

/**
 * Rectangular region of the complex plane, described by its bounds along the
 * real (x) and imaginary (y) axes. A viewport is only usable when both ranges
 * are non-empty: `x_min < x_max` and `y_min < y_max`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "ViewportRepr")]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Parameter files may give either the bounds or a center with half extents.
#[derive(Deserialize)]
#[serde(untagged)]
enum ViewportRepr {
    Bounds {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    Centered {
        center: [f64; 2],
        half_extent: [f64; 2],
    },
}

impl From<ViewportRepr> for Viewport {
    fn from(repr: ViewportRepr) -> Self {
        match repr {
            ViewportRepr::Bounds {
                x_min,
                x_max,
                y_min,
                y_max,
            } => Viewport {
                x_min,
                x_max,
                y_min,
                y_max,
            },
            ViewportRepr::Centered {
                center,
                half_extent,
            } => Viewport::from_center(center, half_extent),
        }
    }
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Viewport> {
        let viewport = Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Unchecked; call `validate()` before sampling.
    pub fn from_center(center: [f64; 2], half_extent: [f64; 2]) -> Viewport {
        Viewport {
            x_min: center[0] - half_extent[0],
            x_max: center[0] + half_extent[0],
            y_min: center[1] - half_extent[1],
            y_max: center[1] + half_extent[1],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        let ordered = self.x_min < self.x_max && self.y_min < self.y_max;
        if finite && ordered {
            Ok(())
        } else {
            Err(FractalError::InvalidViewport {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            })
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Complex64 {
        Complex64::new(
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        )
    }

    /// Each bound independently: `bound(t) = bound0 * (1 - t) + bound1 * t`, with `t` on [0, 1].
    pub fn interpolate(&self, target: &Viewport, t: f64) -> Result<Viewport> {
        if !(0.0..=1.0).contains(&t) {
            return Err(FractalError::invalid_parameter(format!(
                "animation parameter must be on [0, 1], got {}",
                t
            )));
        }
        Ok(Viewport {
            x_min: lerp(self.x_min, target.x_min, t),
            x_max: lerp(self.x_max, target.x_max, t),
            y_min: lerp(self.y_min, target.y_min, t),
            y_max: lerp(self.y_max, target.y_max, t),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_rejects_empty_and_non_finite_ranges() {
        assert!(Viewport::new(-2.5, 1.0, -1.25, 1.25).is_ok());
        assert!(matches!(
            Viewport::new(1.0, 1.0, -1.0, 1.0),
            Err(FractalError::InvalidViewport { .. })
        ));
        assert!(matches!(
            Viewport::new(-1.0, 1.0, 2.0, -2.0),
            Err(FractalError::InvalidViewport { .. })
        ));
        assert!(Viewport::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let start = Viewport::new(-2.5, 1.0, -1.25, 1.25).unwrap();
        let target = Viewport::from_center([-0.74877, 0.06505], [0.001, 0.0006]);

        assert_eq!(start.interpolate(&target, 0.0).unwrap(), start);
        assert_eq!(start.interpolate(&target, 1.0).unwrap(), target);

        let mid = start.interpolate(&target, 0.5).unwrap();
        assert_relative_eq!(mid.x_min, 0.5 * (-2.5 + target.x_min), epsilon = 1e-12);
        assert_relative_eq!(mid.y_max, 0.5 * (1.25 + target.y_max), epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_rejects_out_of_range_parameter() {
        let start = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let target = Viewport::new(-0.5, 0.5, -0.5, 0.5).unwrap();
        assert!(start.interpolate(&target, -0.01).is_err());
        assert!(start.interpolate(&target, 1.01).is_err());
        assert!(start.interpolate(&target, f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_both_forms() {
        let bounds: Viewport =
            serde_json::from_str(r#"{"x_min": -2.5, "x_max": 1.0, "y_min": -1.25, "y_max": 1.25}"#)
                .unwrap();
        assert_eq!(bounds, Viewport::new(-2.5, 1.0, -1.25, 1.25).unwrap());

        let centered: Viewport =
            serde_json::from_str(r#"{"center": [-0.5, 0.0], "half_extent": [1.5, 1.0]}"#)
                .unwrap();
        assert_relative_eq!(centered.x_min, -2.0);
        assert_relative_eq!(centered.x_max, 1.0);
        assert_relative_eq!(centered.y_min, -1.0);
        assert_relative_eq!(centered.y_max, 1.0);
        assert_relative_eq!(centered.center().re, -0.5);
    }
}
