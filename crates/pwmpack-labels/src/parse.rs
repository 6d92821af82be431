use std::io::BufRead;

use tracing::debug;

use pwmpack_frame::{seconds_to_frame, Event};

use crate::error::{LabelError, Result};

/// Parse a whole label file into events, in file order.
///
/// The file is read to the end before any event is handed to a caller, so a
/// syntax error on the last line still yields no partial result. Events are
/// not sorted or de-duplicated; the file's own ordering is the contract.
pub fn parse_labels<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(event) = parse_line(index + 1, &line)? {
            events.push(event);
        }
    }
    debug!(events = events.len(), "parsed label file");
    Ok(events)
}

/// Classify one label line, first grammar wins.
///
/// Grammars, in priority order:
/// 1. `<start> <end> a<code>` — a command label; yields an event.
/// 2. `<start> <end> +` — a region marker; structural, no event.
/// 3. `#...` — comment.
/// 4. Blank or whitespace-only line.
///
/// Matching is anchored at the start of the line only; trailing text after a
/// matched grammar is tolerated, as the exporting editor appends nothing
/// meaningful there. A line matching no grammar fails the whole parse.
pub fn parse_line(lineno: usize, line: &str) -> Result<Option<Event>> {
    if let Some((start, code)) = match_command_label(line) {
        let seconds: f64 = start
            .parse()
            .map_err(|_| LabelError::InvalidTimestamp { line: lineno })?;
        let command: u8 = code
            .parse()
            .map_err(|_| LabelError::InvalidCommand { line: lineno })?;
        return Ok(Some(Event::new(seconds_to_frame(seconds), command)));
    }
    if match_region_label(line) || line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }
    Err(LabelError::Syntax { line: lineno })
}

/// Match `<decimal> <ws> <decimal> <ws> a<digits>`, returning the start
/// timestamp and command code as text.
fn match_command_label(line: &str) -> Option<(&str, &str)> {
    let (start, rest) = take_decimal(line)?;
    let rest = take_spaces(rest)?;
    let (_end, rest) = take_decimal(rest)?;
    let rest = take_spaces(rest)?;
    let rest = rest.strip_prefix('a')?;
    let (code, _rest) = take_digits(rest)?;
    Some((start, code))
}

/// Match `<decimal> <ws> <decimal> <ws> +`.
fn match_region_label(line: &str) -> bool {
    let matched = (|| {
        let (_, rest) = take_decimal(line)?;
        let rest = take_spaces(rest)?;
        let (_, rest) = take_decimal(rest)?;
        let rest = take_spaces(rest)?;
        rest.strip_prefix('+')
    })();
    matched.is_some()
}

/// Take a `digits '.' digits` prefix. Both digit runs are required; the
/// editor always exports full decimals.
fn take_decimal(input: &str) -> Option<(&str, &str)> {
    let (whole, rest) = take_digits(input)?;
    let rest = rest.strip_prefix('.')?;
    let (frac, rest) = take_digits(rest)?;
    let len = whole.len() + 1 + frac.len();
    Some((&input[..len], rest))
}

/// Take a non-empty run of ASCII digits.
fn take_digits(input: &str) -> Option<(&str, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some(input.split_at(end))
}

/// Take a non-empty run of whitespace (the editor exports tabs, humans
/// editing by hand use spaces).
fn take_spaces(input: &str) -> Option<&str> {
    let end = input
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some(&input[end..])
}
