use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{de::DeserializeOwned, Serialize};

pub fn extract_base_name(path: &Path) -> anyhow::Result<&str> {
    path.file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .with_context(|| format!("unable to extract base name from {}", path.display()))
}

/// `out/<command>/<params base name>[/<date_time>]`, created if missing.
pub fn build_output_path_with_date_time(
    params_path: &Path,
    command: &str,
    datetime: &Option<String>,
) -> anyhow::Result<PathBuf> {
    let mut directory_path: PathBuf = ["out", command, extract_base_name(params_path)?]
        .iter()
        .collect();
    if let Some(inner_datetime_str) = datetime {
        directory_path.push(inner_datetime_str);
    }
    std::fs::create_dir_all(&directory_path)
        .with_context(|| format!("unable to create {}", directory_path.display()))?;
    Ok(directory_path)
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    enable.then(date_time_string)
}

/**
 * Store a path and prefix together, making it easily to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
#[derive(Clone, Debug)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_file_with_suffix(
        &self,
        suffix: &str,
    ) -> anyhow::Result<std::io::BufWriter<std::fs::File>> {
        let path = self.with_suffix(suffix);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create file: {}", path.display()))?;
        Ok(std::io::BufWriter::new(file))
    }
}

pub fn serialize_to_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("unable to write {}", path.display()))?;
    tracing::info!("Wrote parameter file to: {}", path.display());
    Ok(())
}

pub fn deserialize_from_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read param file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("unable to parse param file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_name() {
        assert_eq!(
            extract_base_name(Path::new("params/mandelbrot-zoom.json")).unwrap(),
            "mandelbrot-zoom"
        );
        assert!(extract_base_name(Path::new("")).is_err());
    }

    #[test]
    fn test_file_prefix_suffix() {
        let prefix = FilePrefix {
            directory_path: PathBuf::from("out/render/demo"),
            file_base: "frame".to_owned(),
        };
        assert_eq!(
            prefix.with_suffix("_00003.png"),
            PathBuf::from("out/render/demo/frame_00003.png")
        );
    }

    #[test]
    fn test_date_time_string_shape() {
        let stamp = date_time_string();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(maybe_date_time_string(false).is_none());
    }
}
