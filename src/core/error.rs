pub type Result<T> = std::result::Result<T, FractalError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FractalError {
    #[error("invalid viewport: x: [{x_min}, {x_max}], y: [{y_min}, {y_max}]")]
    InvalidViewport {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown color map: `{0}`")]
    UnknownColorMap(String),
}

impl FractalError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn unknown_color_map(name: impl Into<String>) -> Self {
        Self::UnknownColorMap(name.into())
    }
}
