use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct FractalZoomArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,

    /// Log at debug level instead of info.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render a still frame or a zoom animation described by a parameter file.
    Render(ParameterFilePath),
    /// Render a gradient image of a color map.
    ColorSwatch(ParameterFilePath),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: PathBuf,

    /// Write into a date-time stamped sub-directory.
    #[clap(long, short)]
    pub date_time_out: bool,
}
