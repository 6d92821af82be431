use std::fs::File;
use std::io::{BufReader, BufWriter};

use tracing::info;

use pwmpack_frame::mux;
use pwmpack_labels::parse_labels;

use crate::exit::{frame_error, io_error, label_error, CliResult, SUCCESS};
use crate::output::{print_summary, OutputFormat};
use crate::Cli;

pub fn run(args: &Cli, format: OutputFormat) -> CliResult<i32> {
    let label_file = File::open(&args.label_file).map_err(|err| {
        io_error(&format!("failed opening {}", args.label_file.display()), err)
    })?;
    let events = parse_labels(BufReader::new(label_file))
        .map_err(|err| label_error(&args.label_file.display().to_string(), err))?;
    info!(events = events.len(), "parsed label file");

    let audio = File::open(&args.audio_file).map_err(|err| {
        io_error(&format!("failed opening {}", args.audio_file.display()), err)
    })?;
    // The output file is only created once the labels have parsed clean, so
    // a syntax error leaves nothing behind.
    let out = File::create(&args.out_file).map_err(|err| {
        io_error(&format!("failed creating {}", args.out_file.display()), err)
    })?;

    let summary = mux(
        &events,
        BufReader::new(audio),
        BufWriter::new(out),
        args.loop_playback,
    )
    .map_err(|err| frame_error("encode failed", err))?;

    info!(
        frames = summary.frames,
        events_applied = summary.events_applied,
        bytes = summary.bytes_written,
        "wrote block stream"
    );
    print_summary(&args.out_file, &summary, args.loop_playback, format);
    Ok(SUCCESS)
}
