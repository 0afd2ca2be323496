#[cfg(test)]
mod tests {
    use fractal_zoom::{
        cli::color_swatch::ColorSwatchParams, core::image_utils::validate_resolution,
        fractals::common::FractalParams,
    };
    use glob::glob;
    use serde::de::DeserializeOwned;
    use std::any::type_name;
    use std::fs;

    fn parse_all_parameter_files_or_panic<T: DeserializeOwned>(directory: &str) -> Vec<T> {
        let pattern = format!("{}/**/*.json", directory);
        let mut parsed = Vec::new();

        // Use glob to find all matching .json files
        // For each match, ensure that we can (1) open the file and (2) parse it into the specified parameter type.
        for entry in glob(&pattern).expect("Failed to read glob pattern") {
            match entry {
                Ok(path) => {
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

                    match serde_json::from_str::<T>(&content) {
                        Ok(value) => parsed.push(value),
                        Err(err) => {
                            panic!(
                                "Failed to parse JSON file: {:?} as parameter type: `{}`.\n\n{:?}\n",
                                path,
                                type_name::<T>(),
                                err
                            );
                        }
                    }
                }
                Err(e) => panic!("Failed to read path: {:?}. Check permissions.", e),
            }
        }
        parsed
    }

    #[test]
    fn test_ensure_all_parameter_files_can_be_parsed() {
        let render_params =
            parse_all_parameter_files_or_panic::<FractalParams>("params/render");
        assert!(!render_params.is_empty());
        let test_params =
            parse_all_parameter_files_or_panic::<FractalParams>("tests/param_files");
        assert!(!test_params.is_empty());

        let swatch_params =
            parse_all_parameter_files_or_panic::<ColorSwatchParams>("params/color_swatch");
        assert!(!swatch_params.is_empty());
    }

    #[test]
    fn test_ensure_all_parameter_files_are_valid() {
        for directory in ["params/render", "tests/param_files"] {
            for params in parse_all_parameter_files_or_panic::<FractalParams>(directory) {
                match params {
                    FractalParams::MandelbrotFrame(inner) => inner.validate().unwrap(),
                    FractalParams::MandelbrotZoom(inner) => inner.validate().unwrap(),
                }
            }
        }
        for params in parse_all_parameter_files_or_panic::<ColorSwatchParams>("params/color_swatch")
        {
            validate_resolution(&params.resolution).unwrap();
        }
    }
}
