//! Forward-only line reader over a lamedb byte stream.

use std::io::BufRead;

use crate::error::Result;

/// Second bytes of the two-byte UTF-8 sequences dropped from every line:
/// `C2 A0` (no-break space) and `C2 87` (DVB emphasis-off control code).
const STRIPPED_AFTER_C2: [u8; 2] = [0xA0, 0x87];

/// Reads one line at a time, with no look-ahead.
///
/// Returned lines have their terminator removed and the receiver's
/// no-break-space artifacts stripped. Whitespace trimming is left to the
/// caller, since display names must be kept as authored.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Read the next line. `Ok(None)` signals end of stream.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut end = self.buf.len();
        if end > 0 && self.buf[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.buf[end - 1] == b'\r' {
                end -= 1;
            }
        }

        let cleaned = strip_artifacts(&self.buf[..end]);
        Ok(Some(String::from_utf8_lossy(&cleaned).into_owned()))
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

fn strip_artifacts(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == 0xC2 && i + 1 < raw.len() && STRIPPED_AFTER_C2.contains(&raw[i + 1]) {
            i += 2;
            continue;
        }
        out.push(raw[i]);
        i += 1;
    }
    out
}
