use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{ColorMapLookUpTable, NamedColorMap},
    error::{FractalError, Result},
    image_utils::validate_resolution,
    interpolation::Easing,
    viewport::Viewport,
};

use super::{
    colorize::colorize_with,
    mandelbrot::{escape_counts, ConvergenceParams, EscapeCountGrid},
};

/// Upper bound on zoom plus hold frames in a single animation.
pub const MAX_FRAME_COUNT: usize = 100_000;

fn frames_for(seconds: f64, frame_rate: f64) -> f64 {
    (seconds * frame_rate).round()
}

/// Parameters for an animated zoom from one viewport into another.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ZoomParams {
    pub resolution: nalgebra::Vector2<u32>,
    pub start: Viewport,
    pub target: Viewport,
    #[serde(default)]
    pub convergence: ConvergenceParams,
    pub color_map: NamedColorMap,
    pub frame_rate: f64,       // frames per second
    pub duration_seconds: f64, // time spent moving from `start` to `target`
    #[serde(default)]
    pub hold_seconds: f64, // time spent on the final frame
    #[serde(default)]
    pub easing: Easing,
}

impl Default for ZoomParams {
    /// Full view of the set, zooming into a mini-brot in the seahorse valley.
    fn default() -> Self {
        ZoomParams {
            resolution: nalgebra::Vector2::new(640, 360),
            start: Viewport {
                x_min: -2.5,
                x_max: 1.0,
                y_min: -1.25,
                y_max: 1.25,
            },
            target: Viewport::from_center([-0.74877, 0.06505], [0.001, 0.0006]),
            convergence: ConvergenceParams {
                max_iter_count: 600,
                escape_radius: 2.0,
            },
            color_map: NamedColorMap::Turbo,
            frame_rate: 30.0,
            duration_seconds: 6.0,
            hold_seconds: 0.5,
            easing: Easing::Smooth,
        }
    }
}

impl ZoomParams {
    pub fn validate(&self) -> Result<()> {
        self.start.validate()?;
        self.target.validate()?;
        validate_resolution(&self.resolution)?;
        self.convergence.validate()?;
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(FractalError::invalid_parameter(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        for (name, value) in [
            ("duration_seconds", self.duration_seconds),
            ("hold_seconds", self.hold_seconds),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FractalError::invalid_parameter(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        let frame_count = frames_for(self.duration_seconds, self.frame_rate).max(1.0)
            + frames_for(self.hold_seconds, self.frame_rate);
        if frame_count > MAX_FRAME_COUNT as f64 {
            return Err(FractalError::invalid_parameter(format!(
                "animation would need {} frames, at most {} are allowed",
                frame_count, MAX_FRAME_COUNT
            )));
        }
        Ok(())
    }
}

/**
 * Renders the frames of a zoom. Every frame is recomputed from scratch: the viewport
 * for parameter `t` is interpolated between `start` and `target`, sampled, iterated and
 * colored. Nothing is carried over between frames, so any frame can be rendered on its own.
 */
#[derive(Clone, Debug)]
pub struct ZoomAnimation {
    params: ZoomParams,
    color_map: ColorMapLookUpTable,
}

impl ZoomAnimation {
    pub fn new(params: ZoomParams) -> Result<ZoomAnimation> {
        params.validate()?;
        let color_map = params.color_map.lookup_table()?;
        Ok(ZoomAnimation { params, color_map })
    }

    pub fn params(&self) -> &ZoomParams {
        &self.params
    }

    /// Frames spent moving between the viewports; always at least one.
    pub fn zoom_frame_count(&self) -> usize {
        (frames_for(self.params.duration_seconds, self.params.frame_rate) as usize).max(1)
    }

    /// Extra frames that repeat the final image.
    pub fn hold_frame_count(&self) -> usize {
        frames_for(self.params.hold_seconds, self.params.frame_rate) as usize
    }

    /// Never exceeds [`MAX_FRAME_COUNT`] once the parameters are validated.
    pub fn total_frame_count(&self) -> usize {
        self.zoom_frame_count().saturating_add(self.hold_frame_count())
    }

    /// Eased animation parameter `t` for a frame. Hold frames stay at `t = 1`.
    pub fn frame_parameter(&self, frame_index: usize) -> f64 {
        let last = self.zoom_frame_count() - 1;
        if last == 0 {
            return self.params.easing.apply(0.0);
        }
        let s = (frame_index.min(last) as f64) / (last as f64);
        self.params.easing.apply(s)
    }

    pub fn viewport_at(&self, t: f64) -> Result<Viewport> {
        let viewport = self.params.start.interpolate(&self.params.target, t)?;
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn escape_counts_at(&self, t: f64) -> Result<EscapeCountGrid> {
        escape_counts(
            &self.viewport_at(t)?,
            self.params.resolution[0] as usize,
            self.params.resolution[1] as usize,
            &self.params.convergence,
        )
    }

    /// Frame for a linear parameter `t` on [0, 1]; no easing is applied here.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render_frame(&self, t: f64) -> Result<RgbImage> {
        let counts = self.escape_counts_at(t)?;
        colorize_with(
            &counts,
            self.params.convergence.max_iter_count,
            &self.color_map,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_params() -> ZoomParams {
        ZoomParams {
            resolution: nalgebra::Vector2::new(16, 9),
            convergence: ConvergenceParams {
                max_iter_count: 50,
                escape_radius: 2.0,
            },
            frame_rate: 10.0,
            duration_seconds: 1.0,
            hold_seconds: 0.2,
            ..ZoomParams::default()
        }
    }

    #[test]
    fn test_frame_schedule() {
        let animation = ZoomAnimation::new(small_params()).unwrap();
        assert_eq!(animation.zoom_frame_count(), 10);
        assert_eq!(animation.hold_frame_count(), 2);
        assert_eq!(animation.total_frame_count(), 12);

        assert_relative_eq!(animation.frame_parameter(0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(animation.frame_parameter(9), 1.0, epsilon = 1e-12);
        assert_relative_eq!(animation.frame_parameter(11), 1.0, epsilon = 1e-12);
        for k in 1..10 {
            assert!(animation.frame_parameter(k) > animation.frame_parameter(k - 1));
        }
    }

    #[test]
    fn test_single_frame_schedule() {
        let animation = ZoomAnimation::new(ZoomParams {
            duration_seconds: 0.0,
            hold_seconds: 0.0,
            easing: Easing::Linear,
            ..small_params()
        })
        .unwrap();
        assert_eq!(animation.total_frame_count(), 1);
        assert_eq!(animation.frame_parameter(0), 0.0);
    }

    #[test]
    fn test_render_frame_endpoints() {
        let animation = ZoomAnimation::new(small_params()).unwrap();
        let first = animation.render_frame(0.0).unwrap();
        assert_eq!(first.dimensions(), (16, 9));

        assert_eq!(animation.viewport_at(0.0).unwrap(), animation.params().start);
        assert_eq!(animation.viewport_at(1.0).unwrap(), animation.params().target);

        // Frames are pure functions of `t`.
        assert_eq!(animation.render_frame(0.3).unwrap(), animation.render_frame(0.3).unwrap());
        assert!(animation.render_frame(1.5).is_err());
    }

    #[test]
    fn test_invalid_params() {
        assert!(ZoomAnimation::new(ZoomParams {
            frame_rate: 0.0,
            ..small_params()
        })
        .is_err());
        assert!(ZoomAnimation::new(ZoomParams {
            hold_seconds: -1.0,
            ..small_params()
        })
        .is_err());
        assert!(matches!(
            ZoomAnimation::new(ZoomParams {
                target: Viewport {
                    x_min: 0.0,
                    x_max: 0.0,
                    y_min: 0.0,
                    y_max: 1.0
                },
                ..small_params()
            }),
            Err(FractalError::InvalidViewport { .. })
        ));
        assert!(ZoomAnimation::new(ZoomParams {
            resolution: nalgebra::Vector2::new(0, 9),
            ..small_params()
        })
        .is_err());
    }

    #[test]
    fn test_rejects_oversized_frame_schedule() {
        let result = ZoomAnimation::new(ZoomParams {
            duration_seconds: 1e300,
            hold_seconds: 1e300,
            ..ZoomParams::default()
        });
        assert!(matches!(result, Err(FractalError::InvalidParameter(_))));

        // Zoom and hold frames are counted together.
        let result = ZoomAnimation::new(ZoomParams {
            frame_rate: 1.0,
            duration_seconds: MAX_FRAME_COUNT as f64,
            hold_seconds: 1.0,
            ..small_params()
        });
        assert!(matches!(result, Err(FractalError::InvalidParameter(_))));

        let animation = ZoomAnimation::new(ZoomParams {
            frame_rate: 1.0,
            duration_seconds: (MAX_FRAME_COUNT - 1) as f64,
            hold_seconds: 1.0,
            ..small_params()
        })
        .unwrap();
        assert_eq!(animation.total_frame_count(), MAX_FRAME_COUNT);
    }

    #[test]
    fn test_params_json_uses_default_convergence() {
        let text = r#"{
            "resolution": [32, 18],
            "start": {"x_min": -2.5, "x_max": 1.0, "y_min": -1.25, "y_max": 1.25},
            "target": {"x_min": -1.0, "x_max": 0.0, "y_min": -0.5, "y_max": 0.5},
            "color_map": "gray",
            "frame_rate": 24.0,
            "duration_seconds": 2.0
        }"#;
        let params: ZoomParams = serde_json::from_str(text).unwrap();
        assert_eq!(params.convergence, ConvergenceParams::default());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_json() {
        let text = r#"{
            "resolution": [32, 18],
            "start": {"x_min": -2.5, "x_max": 1.0, "y_min": -1.25, "y_max": 1.25},
            "target": {"center": [-0.74877, 0.06505], "half_extent": [0.001, 0.0006]},
            "convergence": {"max_iter_count": 600},
            "color_map": "turbo",
            "frame_rate": 30.0,
            "duration_seconds": 6.0
        }"#;
        let params: ZoomParams = serde_json::from_str(text).unwrap();
        assert_eq!(params.resolution, nalgebra::Vector2::new(32, 18));
        assert_eq!(params.easing, Easing::Smooth);
        assert_eq!(params.hold_seconds, 0.0);
        assert_eq!(params.target, ZoomParams::default().target);
        assert!(params.validate().is_ok());
    }
}
