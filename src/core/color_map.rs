use std::str::FromStr;

use image::Rgb;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::error::{FractalError, Result};
use crate::core::interpolation::{
    InterpolationKeyframe, Interpolator, KeyframeInterpolator, LinearInterpolator,
};
use crate::core::lookup_table::LookupTable;

/// Number of distinct colors in a lookup table built from a named color map.
pub const COLOR_MAP_ENTRY_COUNT: usize = 256;

/**
 * Represents a single "keyframe" of the color map, pairing a
 * "query" with the color that should be produced at that query point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorMapKeyFrame {
    pub query: f32,    // specify location of this color within the map; on [0,1]
    pub rgb: [f32; 3], // [R, G, B], each on [0,1]
}

const fn key(query: f32, r: f32, g: f32, b: f32) -> ColorMapKeyFrame {
    ColorMapKeyFrame {
        query,
        rgb: [r, g, b],
    }
}

/// Scale a unit-range color to 8-bit channels. Truncates: `floor(channel * 255)`.
pub fn rgb_to_pixel(color: &Vector3<f32>) -> Rgb<u8> {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([channel(color[0]), channel(color[1]), channel(color[2])])
}

pub trait ColorMapper {
    /// Color at `query` on [0,1], with each channel on [0,1].
    fn compute_rgb(&self, query: f32) -> Vector3<f32>;

    fn compute_pixel(&self, query: f32) -> Rgb<u8> {
        rgb_to_pixel(&self.compute_rgb(query))
    }
}

/**
 * Simple implementation of a "piecewise linear" color map, where the colors
 * are represented by simple linear interpolation in RGB color space. This is
 * not "strictly correct" from a color standpoint, but it works well enough in
 * practice.
 */
pub struct ColorMap<F>
where
    F: Interpolator<f32, Vector3<f32>>,
{
    interpolator: KeyframeInterpolator<f32, Vector3<f32>, F>,
}

impl<F> ColorMap<F>
where
    F: Interpolator<f32, Vector3<f32>>,
{
    pub fn new(keyframes: &[ColorMapKeyFrame], interpolator: F) -> Result<Self> {
        let internal_keyframes: Vec<InterpolationKeyframe<f32, Vector3<f32>>> = keyframes
            .iter()
            .map(|kf| InterpolationKeyframe {
                input: kf.query,
                output: Vector3::new(kf.rgb[0], kf.rgb[1], kf.rgb[2]),
            })
            .collect();

        let interpolator = KeyframeInterpolator::new(internal_keyframes, interpolator)?;

        Ok(Self { interpolator })
    }
}

impl<F> ColorMapper for ColorMap<F>
where
    F: Interpolator<f32, Vector3<f32>>,
{
    fn compute_rgb(&self, query: f32) -> Vector3<f32> {
        self.interpolator.evaluate(query)
    }
}

/// Polynomial fit of the Turbo rainbow palette (Mikhailov, 2019).
#[derive(Default, Clone, Copy, Debug)]
pub struct TurboPolynomial;

impl ColorMapper for TurboPolynomial {
    fn compute_rgb(&self, query: f32) -> Vector3<f32> {
        let x = query.clamp(0.0, 1.0);
        let horner = |c: [f32; 6]| c[0] + x * (c[1] + x * (c[2] + x * (c[3] + x * (c[4] + x * c[5]))));
        let r = horner([
            0.135_721_38,
            4.615_392_6,
            -42.660_322,
            132.131_08,
            -152.942_4,
            59.286_38,
        ]);
        let g = horner([
            0.091_402_61,
            2.194_188_4,
            4.842_966_6,
            -14.185_033,
            4.277_298_7,
            2.829_566,
        ]);
        let b = horner([
            0.106_673_3,
            12.641_946,
            -60.582_05,
            110.362_77,
            -89.903_11,
            27.348_25,
        ]);
        Vector3::new(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }
}

const VIRIDIS: [ColorMapKeyFrame; 9] = [
    key(0.0, 0.267004, 0.004874, 0.329415),
    key(0.125, 0.282623, 0.140926, 0.457517),
    key(0.25, 0.229739, 0.322361, 0.545706),
    key(0.375, 0.172719, 0.448791, 0.557885),
    key(0.5, 0.127568, 0.566949, 0.550556),
    key(0.625, 0.157851, 0.683765, 0.501686),
    key(0.75, 0.369214, 0.788888, 0.382914),
    key(0.875, 0.678489, 0.863742, 0.189503),
    key(1.0, 0.993248, 0.906157, 0.143936),
];

const PLASMA: [ColorMapKeyFrame; 9] = [
    key(0.0, 0.050383, 0.029803, 0.527975),
    key(0.125, 0.274191, 0.012109, 0.622722),
    key(0.25, 0.494877, 0.011990, 0.657865),
    key(0.375, 0.665129, 0.138566, 0.585582),
    key(0.5, 0.798216, 0.280197, 0.469538),
    key(0.625, 0.897452, 0.423122, 0.358537),
    key(0.75, 0.973416, 0.585761, 0.251540),
    key(0.875, 0.993326, 0.771659, 0.154120),
    key(1.0, 0.940015, 0.975158, 0.131326),
];

const INFERNO: [ColorMapKeyFrame; 9] = [
    key(0.0, 0.001462, 0.000466, 0.013866),
    key(0.125, 0.110536, 0.047399, 0.281851),
    key(0.25, 0.341500, 0.062325, 0.429425),
    key(0.375, 0.550287, 0.161158, 0.405790),
    key(0.5, 0.735683, 0.215906, 0.330245),
    key(0.625, 0.893616, 0.360819, 0.214190),
    key(0.75, 0.978422, 0.557937, 0.034931),
    key(0.875, 0.976190, 0.773592, 0.258500),
    key(1.0, 0.988362, 0.998364, 0.644924),
];

const MAGMA: [ColorMapKeyFrame; 9] = [
    key(0.0, 0.001462, 0.000466, 0.013866),
    key(0.125, 0.113094, 0.065492, 0.276784),
    key(0.25, 0.316654, 0.071690, 0.485380),
    key(0.375, 0.512831, 0.125889, 0.507291),
    key(0.5, 0.716387, 0.214982, 0.475290),
    key(0.625, 0.904281, 0.315714, 0.400968),
    key(0.75, 0.986700, 0.535582, 0.382210),
    key(0.875, 0.996096, 0.762524, 0.525289),
    key(1.0, 0.987053, 0.991438, 0.749504),
];

const GRAY: [ColorMapKeyFrame; 2] = [key(0.0, 0.0, 0.0, 0.0), key(1.0, 1.0, 1.0, 1.0)];

/// Color maps that can be selected by name from a parameter file or the CLI.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum NamedColorMap {
    Turbo,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Gray,
}

impl NamedColorMap {
    pub const ALL: [NamedColorMap; 6] = [
        NamedColorMap::Turbo,
        NamedColorMap::Viridis,
        NamedColorMap::Plasma,
        NamedColorMap::Inferno,
        NamedColorMap::Magma,
        NamedColorMap::Gray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamedColorMap::Turbo => "turbo",
            NamedColorMap::Viridis => "viridis",
            NamedColorMap::Plasma => "plasma",
            NamedColorMap::Inferno => "inferno",
            NamedColorMap::Magma => "magma",
            NamedColorMap::Gray => "gray",
        }
    }

    fn keyframes(&self) -> &'static [ColorMapKeyFrame] {
        match self {
            NamedColorMap::Turbo => &[],
            NamedColorMap::Viridis => &VIRIDIS,
            NamedColorMap::Plasma => &PLASMA,
            NamedColorMap::Inferno => &INFERNO,
            NamedColorMap::Magma => &MAGMA,
            NamedColorMap::Gray => &GRAY,
        }
    }

    /// Precompute the 256-entry table used to color whole frames.
    pub fn lookup_table(&self) -> Result<ColorMapLookUpTable> {
        match self {
            NamedColorMap::Turbo => Ok(ColorMapLookUpTable::from_color_map(
                &TurboPolynomial,
                COLOR_MAP_ENTRY_COUNT,
            )),
            _ => {
                let color_map = ColorMap::new(self.keyframes(), LinearInterpolator)?;
                Ok(ColorMapLookUpTable::from_color_map(
                    &color_map,
                    COLOR_MAP_ENTRY_COUNT,
                ))
            }
        }
    }
}

impl FromStr for NamedColorMap {
    type Err = FractalError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "turbo" => Ok(NamedColorMap::Turbo),
            "viridis" => Ok(NamedColorMap::Viridis),
            "plasma" => Ok(NamedColorMap::Plasma),
            "inferno" => Ok(NamedColorMap::Inferno),
            "magma" => Ok(NamedColorMap::Magma),
            "gray" | "grey" | "greys_r" => Ok(NamedColorMap::Gray),
            _ => Err(FractalError::unknown_color_map(name)),
        }
    }
}

impl TryFrom<String> for NamedColorMap {
    type Error = FractalError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<NamedColorMap> for String {
    fn from(color_map: NamedColorMap) -> Self {
        color_map.name().to_owned()
    }
}

impl std::fmt::Display for NamedColorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/**
 * Wrapper around a color map that precomputes a look-up table mapping from query
 * to the resulting color. This makes evaluation much faster.
 */
#[derive(Clone, Debug)]
pub struct ColorMapLookUpTable {
    pub table: LookupTable<Rgb<u8>>,
}

impl ColorMapLookUpTable {
    pub fn from_color_map<F: ColorMapper>(
        color_map: &F,
        entry_count: usize,
    ) -> ColorMapLookUpTable {
        ColorMapLookUpTable {
            table: LookupTable::new([0.0, 1.0], entry_count, |query: f32| {
                color_map.compute_pixel(query)
            }),
        }
    }

    pub fn compute_pixel(&self, query: f32) -> Rgb<u8> {
        self.table.lookup(query)
    }
}
