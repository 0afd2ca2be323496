use anyhow::Context as _;

use crate::core::{
    file_io::{serialize_to_json, FilePrefix},
    image_utils::write_image_to_file,
    stopwatch::Stopwatch,
};
use crate::fractals::{
    common::{FractalParams, MandelbrotFrameParams},
    zoom::{ZoomAnimation, ZoomParams},
};

pub fn render_fractal(params: &FractalParams, file_prefix: FilePrefix) -> anyhow::Result<()> {
    match params {
        FractalParams::MandelbrotFrame(inner_params) => render_still(inner_params, file_prefix),
        FractalParams::MandelbrotZoom(inner_params) => render_zoom(inner_params, file_prefix),
    }
}

fn render_still(params: &MandelbrotFrameParams, file_prefix: FilePrefix) -> anyhow::Result<()> {
    let mut stopwatch = Stopwatch::new("Render Stopwatch".to_owned());

    serialize_to_json(&file_prefix.with_suffix(".json"), params)?;
    stopwatch.record_split("basic setup".to_owned());

    let image = params.render()?;
    stopwatch.record_split("compute and color escape counts".to_owned());

    write_image_to_file(&file_prefix.with_suffix(".png"), &image)?;
    stopwatch.record_split("write PNG".to_owned());

    write_diagnostics(&stopwatch, &file_prefix)
}

/// Writes every frame of the zoom as `frame_00000.png`, `frame_00001.png`, ...
/// next to the parameter file copy.
fn render_zoom(params: &ZoomParams, file_prefix: FilePrefix) -> anyhow::Result<()> {
    let mut stopwatch = Stopwatch::new("Zoom Stopwatch".to_owned());

    serialize_to_json(&file_prefix.with_suffix(".json"), params)?;
    let animation = ZoomAnimation::new(params.clone())?;
    let frame_prefix = FilePrefix {
        directory_path: file_prefix.directory_path.clone(),
        file_base: "frame".to_owned(),
    };
    let frame_path = |index: usize| frame_prefix.with_suffix(&format!("_{:05}.png", index));
    stopwatch.record_split("basic setup".to_owned());

    let zoom_frame_count = animation.zoom_frame_count();
    let mut last_image = None;
    for index in 0..zoom_frame_count {
        let t = animation.frame_parameter(index);
        let image = animation
            .render_frame(t)
            .with_context(|| format!("failed to render frame {} (t = {})", index, t))?;
        write_image_to_file(&frame_path(index), &image)?;
        tracing::info!(frame = index, of = zoom_frame_count, t, "rendered zoom frame");
        last_image = Some(image);
    }
    stopwatch.record_split(format!("render {} zoom frames", zoom_frame_count));

    if let Some(image) = last_image {
        for index in zoom_frame_count..animation.total_frame_count() {
            write_image_to_file(&frame_path(index), &image)?;
        }
    }
    stopwatch.record_split(format!("write {} hold frames", animation.hold_frame_count()));

    write_diagnostics(&stopwatch, &file_prefix)
}

fn write_diagnostics(stopwatch: &Stopwatch, file_prefix: &FilePrefix) -> anyhow::Result<()> {
    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt")?;
    stopwatch.display(&mut diagnostics_file)?;
    Ok(())
}
