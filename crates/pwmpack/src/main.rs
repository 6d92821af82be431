mod encode;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "pwmpack",
    version,
    about = "Pack 8-bit PCM audio and Audacity label commands into a 512-byte block stream"
)]
pub struct Cli {
    /// Unsigned 8-bit PCM file to read.
    pub audio_file: PathBuf,

    /// Label file to read, in Audacity format.
    pub label_file: PathBuf,

    /// File to write the combined audio/command stream to.
    pub out_file: PathBuf,

    /// Loop the track when playback reaches the end instead of stopping.
    #[arg(long = "loop")]
    pub loop_playback: bool,

    /// Summary output format.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = encode::run(&cli, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
