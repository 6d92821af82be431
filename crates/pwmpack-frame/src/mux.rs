use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::command;
use crate::error::{FrameError, Result};
use crate::format::{Event, PAYLOAD_SIZE};
use crate::writer::BlockWriter;

/// What a completed mux pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuxSummary {
    /// Data frames written (header and terminal block excluded).
    pub frames: u64,
    /// Events whose command byte was stamped onto a frame.
    pub events_applied: usize,
    /// Total output bytes, always a multiple of the block size.
    pub bytes_written: u64,
}

/// Multiplex audio and label events into the output block stream.
///
/// Writes the header, then one data frame per full 511-byte audio chunk,
/// then the terminal block once the source runs short. `events` must be in
/// ascending frame order as produced by the label parser; only the event at
/// the cursor is consulted, so a duplicate or out-of-order index is never
/// applied: it stays at the cursor while the frame counter moves past it.
/// That matches the device toolchain this format comes from.
///
/// Events pointing past the end of the audio are ignored. Any I/O error
/// aborts the pass immediately.
pub fn mux<R: Read, W: Write>(
    events: &[Event],
    mut audio: R,
    sink: W,
    loop_playback: bool,
) -> Result<MuxSummary> {
    let mut writer = BlockWriter::new(sink);
    writer.write_header()?;

    let mut chunk = [0u8; PAYLOAD_SIZE];
    let mut cursor = 0usize;
    let mut frame = 0u64;
    let mut events_applied = 0usize;

    loop {
        let filled = fill_chunk(&mut audio, &mut chunk)?;
        if filled < PAYLOAD_SIZE {
            // Source exhausted; an empty read lands here too.
            writer.write_terminal(command::terminal_command(loop_playback))?;
            writer.flush()?;
            return Ok(MuxSummary {
                frames: frame,
                events_applied,
                bytes_written: writer.bytes_written(),
            });
        }

        let cmd = match events.get(cursor) {
            Some(event) if event.frame == frame => {
                cursor += 1;
                events_applied += 1;
                debug!(frame, command = event.command, "stamped command onto frame");
                event.command
            }
            _ => command::NONE,
        };

        writer.write_frame(cmd, &chunk)?;
        frame += 1;
    }
}

/// Fill `chunk` from the reader, retrying short and interrupted reads.
/// Returns the bytes filled; less than `chunk.len()` only at EOF.
fn fill_chunk<R: Read>(reader: &mut R, chunk: &mut [u8]) -> Result<usize> {
    let mut filled = 0usize;
    while filled < chunk.len() {
        match reader.read(&mut chunk[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::format::{BLOCK_SIZE, HEADER_SIZE, TERMINAL_FILL};

    fn run(events: &[Event], audio: &[u8], loop_playback: bool) -> (MuxSummary, Vec<u8>) {
        let mut out = Vec::new();
        let summary = mux(events, Cursor::new(audio), &mut out, loop_playback).unwrap();
        (summary, out)
    }

    fn data_frame(out: &[u8], index: usize) -> &[u8] {
        let start = HEADER_SIZE + index * BLOCK_SIZE;
        &out[start..start + BLOCK_SIZE]
    }

    #[test]
    fn empty_audio_is_header_plus_terminal() {
        let (summary, out) = run(&[], &[], false);
        assert_eq!(out.len(), HEADER_SIZE + BLOCK_SIZE);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.bytes_written, out.len() as u64);
        assert!(out[..HEADER_SIZE].iter().all(|&b| b == 0));
        assert_eq!(out[HEADER_SIZE], command::STOP);
        assert!(out[HEADER_SIZE + 1..].iter().all(|&b| b == TERMINAL_FILL));
    }

    #[test]
    fn three_full_chunks_make_3584_bytes() {
        let audio = vec![0x55u8; 3 * PAYLOAD_SIZE];
        let (summary, out) = run(&[], &audio, false);

        assert_eq!(out.len(), 1024 + 3 * 512 + 512);
        assert_eq!(summary.frames, 3);
        for i in 0..3 {
            let frame = data_frame(&out, i);
            assert_eq!(frame[0], command::NONE);
            assert!(frame[1..].iter().all(|&b| b == 0x55));
        }
        let terminal = data_frame(&out, 3);
        assert_eq!(terminal[0], command::STOP);
        assert!(terminal[1..].iter().all(|&b| b == TERMINAL_FILL));
    }

    #[test]
    fn trailing_partial_chunk_is_dropped() {
        // 2 full chunks plus 100 leftover bytes: leftover never reaches the
        // output, the terminal block takes its place.
        let audio = vec![1u8; 2 * PAYLOAD_SIZE + 100];
        let (summary, out) = run(&[], &audio, false);
        assert_eq!(summary.frames, 2);
        assert_eq!(out.len(), HEADER_SIZE + 3 * BLOCK_SIZE);
    }

    #[test]
    fn loop_flag_selects_terminal_command() {
        let (_, out) = run(&[], &[], true);
        assert_eq!(out[HEADER_SIZE], command::LOOP);
    }

    #[test]
    fn event_stamps_only_its_frame() {
        let audio = vec![0u8; 4 * PAYLOAD_SIZE];
        let events = [Event::new(2, command::LOOP)];
        let (summary, out) = run(&events, &audio, false);

        assert_eq!(summary.events_applied, 1);
        for i in 0..4 {
            let expected = if i == 2 { command::LOOP } else { command::NONE };
            assert_eq!(data_frame(&out, i)[0], expected, "frame {i}");
        }
    }

    #[test]
    fn duplicate_frame_index_first_wins() {
        let audio = vec![0u8; 3 * PAYLOAD_SIZE];
        let events = [Event::new(1, 5), Event::new(1, 9)];
        let (summary, out) = run(&events, &audio, false);

        assert_eq!(summary.events_applied, 1);
        assert_eq!(data_frame(&out, 1)[0], 5);
        assert_eq!(data_frame(&out, 0)[0], command::NONE);
        assert_eq!(data_frame(&out, 2)[0], command::NONE);
    }

    #[test]
    fn stale_event_blocks_later_events() {
        // Regression for the source toolchain behavior: once an event's
        // index has been passed, it pins the cursor and everything after it
        // goes unapplied.
        let audio = vec![0u8; 4 * PAYLOAD_SIZE];
        let events = [Event::new(1, 5), Event::new(1, 9), Event::new(3, 7)];
        let (summary, out) = run(&events, &audio, false);

        assert_eq!(summary.events_applied, 1);
        assert_eq!(data_frame(&out, 3)[0], command::NONE);
    }

    #[test]
    fn event_past_end_of_audio_is_ignored() {
        let audio = vec![0u8; PAYLOAD_SIZE];
        let events = [Event::new(10, command::STOP)];
        let (summary, _) = run(&events, &audio, false);
        assert_eq!(summary.events_applied, 0);
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn reserved_command_codes_pass_through() {
        let audio = vec![0u8; PAYLOAD_SIZE];
        let events = [Event::new(0, 200)];
        let (_, out) = run(&events, &audio, false);
        assert_eq!(data_frame(&out, 0)[0], 200);
    }

    #[test]
    fn short_reads_are_refilled() {
        // A reader that trickles one byte at a time still yields full frames.
        struct Trickle<'a> {
            data: &'a [u8],
            pos: usize,
        }
        impl Read for Trickle<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.pos == self.data.len() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.data[self.pos];
                self.pos += 1;
                Ok(1)
            }
        }

        let audio = vec![9u8; PAYLOAD_SIZE];
        let mut out = Vec::new();
        let summary = mux(
            &[],
            Trickle {
                data: &audio,
                pos: 0,
            },
            &mut out,
            false,
        )
        .unwrap();
        assert_eq!(summary.frames, 1);
        assert!(data_frame(&out, 0)[1..].iter().all(|&b| b == 9));
    }

    #[test]
    fn read_error_aborts() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let mut out = Vec::new();
        let err = mux(&[], FailingReader, &mut out, false).unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
    }
}
