use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use pwmpack_frame::{command_name, terminal_command, MuxSummary};
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    out_file: &'a str,
    frames: u64,
    events_applied: usize,
    bytes_written: u64,
    terminal: &'a str,
}

pub fn print_summary(out_file: &Path, summary: &MuxSummary, loop_playback: bool, format: OutputFormat) {
    let terminal = command_name(terminal_command(loop_playback));
    match format {
        OutputFormat::Json => {
            let path = out_file.display().to_string();
            let out = SummaryOutput {
                out_file: &path,
                frames: summary.frames,
                events_applied: summary.events_applied,
                bytes_written: summary.bytes_written,
                terminal,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            println!(
                "wrote {} ({} bytes): {} data frames, {} commands applied, terminal {}",
                out_file.display(),
                summary.bytes_written,
                summary.frames,
                summary.events_applied,
                terminal
            );
        }
    }
}
