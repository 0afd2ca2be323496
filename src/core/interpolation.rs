use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::core::error::{FractalError, Result};

/// Trait for interpolation between two values
pub trait Interpolator<T, V>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V;
}

/// Keyframes, used to construct (and define) a piecewise interpolator
/// Generic keyframe: maps an input (query) to an output value.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T, V> {
    pub input: T,
    pub output: V,
}

/// Generic container for performing interpolation between keyframes
#[derive(Clone, Debug)]
pub struct KeyframeInterpolator<T, V, F>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    queries: Vec<T>,
    values: Vec<V>,
    interpolator: F,
}

impl<T, V, F> KeyframeInterpolator<T, V, F>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    /// Keyframes must span [0, 1] with strictly increasing inputs.
    pub fn new(keyframes: Vec<InterpolationKeyframe<T, V>>, interpolator: F) -> Result<Self> {
        let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
            return Err(FractalError::invalid_parameter("keyframes must not be empty"));
        };
        if first.input != T::zero() {
            return Err(FractalError::invalid_parameter(
                "first keyframe input must be 0.0",
            ));
        }
        if last.input != T::one() {
            return Err(FractalError::invalid_parameter(
                "last keyframe input must be 1.0",
            ));
        }
        if keyframes.windows(2).any(|pair| pair[0].input >= pair[1].input) {
            return Err(FractalError::invalid_parameter(
                "keyframes must be strictly increasing",
            ));
        }

        let queries = keyframes.iter().map(|k| k.input).collect();
        let values = keyframes.iter().map(|k| k.output).collect();

        Ok(Self {
            queries,
            values,
            interpolator,
        })
    }

    pub fn evaluate(&self, query: T) -> V {
        // Both vectors are non-empty by construction.
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        if query.is_nan() || query <= T::zero() {
            first
        } else if query >= T::one() {
            last
        } else {
            let idx_upp = self.queries.partition_point(|q| query >= *q);
            let idx_low = idx_upp - 1;
            let val_low = self.queries[idx_low];
            let alpha = (query - val_low) / (self.queries[idx_upp] - val_low);
            self.interpolator
                .interpolate(alpha, &self.values[idx_low], &self.values[idx_upp])
        }
    }
}

/// Linear interpolation: a * (1 - alpha) + b * alpha
#[derive(Default, Clone, Copy, Debug)]
pub struct LinearInterpolator;

impl<T, V> Interpolator<T, V> for LinearInterpolator
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        *a + (*b - *a) * alpha
    }
}

/// Blend two scalars as `a * (1 - t) + b * t`. Exact at both ends.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Pacing curve applied by the animation clock before the viewport is interpolated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    Smooth,
}

impl Easing {
    const SMOOTH_INFLECTION: f64 = 10.0;

    pub fn apply(&self, s: f64) -> f64 {
        match self {
            Easing::Linear => s.clamp(0.0, 1.0),
            Easing::Smooth => {
                let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
                let error = sigmoid(-0.5 * Self::SMOOTH_INFLECTION);
                let raw = (sigmoid(Self::SMOOTH_INFLECTION * (s - 0.5)) - error)
                    / (1.0 - 2.0 * error);
                raw.clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scalar_keyframes(points: &[(f64, f64)]) -> Vec<InterpolationKeyframe<f64, f64>> {
        points
            .iter()
            .map(|&(input, output)| InterpolationKeyframe { input, output })
            .collect()
    }

    #[test]
    fn test_keyframe_interpolator_linear_segments() {
        let interpolator = KeyframeInterpolator::new(
            scalar_keyframes(&[(0.0, 0.0), (0.25, 10.0), (1.0, 40.0)]),
            LinearInterpolator,
        )
        .unwrap();

        assert_eq!(interpolator.evaluate(-1.0), 0.0);
        assert_eq!(interpolator.evaluate(2.0), 40.0);
        assert_eq!(interpolator.evaluate(f64::NAN), 0.0);
        assert_relative_eq!(interpolator.evaluate(0.125), 5.0, epsilon = 1e-12);
        assert_relative_eq!(interpolator.evaluate(0.25), 10.0, epsilon = 1e-12);
        assert_relative_eq!(interpolator.evaluate(0.625), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_keyframe_interpolator_rejects_bad_keyframes() {
        assert!(KeyframeInterpolator::new(scalar_keyframes(&[]), LinearInterpolator).is_err());
        assert!(KeyframeInterpolator::new(
            scalar_keyframes(&[(0.1, 0.0), (1.0, 1.0)]),
            LinearInterpolator
        )
        .is_err());
        assert!(KeyframeInterpolator::new(
            scalar_keyframes(&[(0.0, 0.0), (0.9, 1.0)]),
            LinearInterpolator
        )
        .is_err());
        assert!(KeyframeInterpolator::new(
            scalar_keyframes(&[(0.0, 0.0), (0.5, 1.0), (0.5, 2.0), (1.0, 3.0)]),
            LinearInterpolator
        )
        .is_err());
    }

    #[test]
    fn test_lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(-2.5, -0.74977, 0.0), -2.5);
        assert_eq!(lerp(-2.5, -0.74977, 1.0), -0.74977);
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_easing_endpoints_and_symmetry() {
        for easing in [Easing::Linear, Easing::Smooth] {
            assert_relative_eq!(easing.apply(0.0), 0.0, epsilon = 1e-12);
            assert_relative_eq!(easing.apply(1.0), 1.0, epsilon = 1e-12);
            assert_relative_eq!(easing.apply(0.5), 0.5, epsilon = 1e-12);
        }
        // Smooth pacing starts slower than linear.
        assert!(Easing::Smooth.apply(0.1) < 0.1);
        assert!(Easing::Smooth.apply(0.9) > 0.9);
    }
}
