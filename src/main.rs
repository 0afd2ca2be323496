use std::path::Path;

use clap::Parser;
use fractal_zoom::cli::args::{CommandsEnum, FractalZoomArgs, ParameterFilePath};
use fractal_zoom::cli::color_swatch::{generate_color_swatch, ColorSwatchParams};
use fractal_zoom::cli::render::render_fractal;
use fractal_zoom::core::file_io::{
    build_output_path_with_date_time, deserialize_from_json, extract_base_name,
    maybe_date_time_string, FilePrefix,
};
use fractal_zoom::fractals::common::FractalParams;
use tracing::Level;

fn build_file_prefix(params: &ParameterFilePath, command: &str) -> anyhow::Result<FilePrefix> {
    let params_path: &Path = &params.params_path;
    Ok(FilePrefix {
        directory_path: build_output_path_with_date_time(
            params_path,
            command,
            &maybe_date_time_string(params.date_time_out),
        )?,
        file_base: extract_base_name(params_path)?.to_owned(),
    })
}

fn main() -> anyhow::Result<()> {
    let args: FractalZoomArgs = FractalZoomArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .init();

    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let fractal_params: FractalParams = deserialize_from_json(&params.params_path)?;
            render_fractal(&fractal_params, build_file_prefix(params, "render")?)
        }
        Some(CommandsEnum::ColorSwatch(params)) => {
            let swatch_params: ColorSwatchParams = deserialize_from_json(&params.params_path)?;
            generate_color_swatch(&swatch_params, build_file_prefix(params, "color_swatch")?)
        }
        None => {
            tracing::warn!("No command specified; see `--help`.");
            Ok(())
        }
    }
}
