//! Line-delimited JSON input for the batch binary.

use anyhow::{Context, Result};
use std::io::BufRead;

use super::types::RawItem;

/// Items parsed from an NDJSON stream plus the count of lines that were
/// skipped because they were not valid UTF-8 or not a valid item.
#[derive(Debug, Default)]
pub struct NdjsonBatch {
    pub items: Vec<RawItem>,
    pub bad_lines: usize,
}

/// Reads every line of `input`. Blank lines are ignored; unparsable lines
/// are logged and counted. Only an I/O error from the reader is fatal.
pub fn read_items(input: impl BufRead) -> Result<NdjsonBatch> {
    let mut out = NdjsonBatch::default();
    for (n, line) in input.split(b'\n').enumerate() {
        let line = line.context("reading input")?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<RawItem>(&line) {
            Ok(it) => out.items.push(it),
            Err(e) => {
                out.bad_lines += 1;
                tracing::warn!(line = n + 1, error = %e, "skipping unparsable line");
            }
        }
    }
    Ok(out)
}
