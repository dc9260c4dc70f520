#![forbid(unsafe_code)]

//! Atomic display cells.
//!
//! A [`Cell`] is the smallest renderable unit of spinner text: one grapheme
//! cluster (a base character plus any zero-width marks) occupying 1 or 2
//! terminal columns. Frames are plain `Vec<Cell>`; their display width is
//! the sum of their cells' widths.
//!
//! Decoration (SGR escape sequences such as `ESC [ 31 m`) embedded in
//! author text is carried as a zero-width prefix of the cell that follows
//! it, so [`join`] reproduces the original text byte for byte while width
//! arithmetic sees only the visible clusters. [`strip_decoration`] removes
//! the escape bytes for diagnostic output.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ESC: char = '\u{1b}';

/// An ordered sequence of cells rendered atomically as one animation tick.
pub type Frame = Vec<Cell>;

/// One grapheme cluster with its cached terminal column width.
///
/// Immutable value type; construct through [`split`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    /// The raw text of this cell, including any decoration prefix.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Display width in terminal columns (1 or 2).
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether this cell occupies two terminal columns.
    #[inline]
    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.width == 2
    }

    /// The cell text with decoration removed.
    #[must_use]
    pub fn plain(&self) -> String {
        strip_sgr(&self.text)
    }
}

/// Split raw text into cells.
///
/// Grapheme clusters become cells with their measured column width,
/// clamped to 2. Zero-width clusters (stray combining marks, zero-width
/// spaces) are folded into the preceding cell; a leading zero-width
/// cluster is promoted to a narrow cell so no text is lost. SGR escape
/// sequences become a decoration prefix of the next cell.
#[must_use]
pub fn split(text: &str) -> Vec<Cell> {
    let mut cells: Vec<Cell> = Vec::new();
    let mut pending = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.starts_with(ESC) {
            match sgr_len(rest) {
                Some(len) => {
                    pending.push_str(&rest[..len]);
                    rest = &rest[len..];
                }
                None => {
                    // Lone escape byte: zero columns, keep it with the
                    // decoration so join() still round-trips.
                    pending.push(ESC);
                    rest = &rest[ESC.len_utf8()..];
                }
            }
            continue;
        }

        let run = match rest.find(ESC) {
            Some(i) => &rest[..i],
            None => rest,
        };
        rest = &rest[run.len()..];

        for grapheme in run.graphemes(true) {
            let measured = UnicodeWidthStr::width(grapheme);
            if measured == 0 {
                if let Some(last) = cells.last_mut() {
                    last.text.push_str(&std::mem::take(&mut pending));
                    last.text.push_str(grapheme);
                    continue;
                }
            }
            let mut cell_text = std::mem::take(&mut pending);
            cell_text.push_str(grapheme);
            cells.push(Cell {
                text: cell_text,
                width: measured.clamp(1, 2),
            });
        }
    }

    // Trailing decoration (typically a reset) sticks to the last cell.
    if !pending.is_empty() {
        if let Some(last) = cells.last_mut() {
            last.text.push_str(&pending);
        }
    }

    cells
}

/// Render cells back to text.
#[must_use]
pub fn join(cells: &[Cell]) -> String {
    cells.iter().map(Cell::as_str).collect()
}

/// Total display width of a frame in terminal columns.
#[must_use]
pub fn frame_width(frame: &[Cell]) -> usize {
    frame.iter().map(Cell::width).sum()
}

/// Cells with embedded decoration removed.
///
/// Cells left without any visible text are dropped.
#[must_use]
pub fn strip_decoration(cells: &[Cell]) -> Vec<Cell> {
    cells
        .iter()
        .filter_map(|cell| {
            let text = strip_sgr(&cell.text);
            if text.is_empty() {
                None
            } else {
                Some(Cell {
                    text,
                    width: cell.width,
                })
            }
        })
        .collect()
}

/// Repair a frame after arbitrary text surgery.
///
/// Rebuilds cell boundaries and cached widths by re-splitting the joined
/// text. Idempotent on well-formed frames.
#[must_use]
pub fn normalize(frame: &[Cell]) -> Frame {
    split(&join(frame))
}

/// Byte length of a complete SGR sequence (`ESC [ … m`) at the start of
/// `s`, or `None` if `s` does not start with one.
fn sgr_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate().skip(2) {
        match b {
            b'0'..=b'9' | b';' => {}
            b'm' => return Some(i + 1),
            _ => return None,
        }
    }
    None
}

fn strip_sgr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if rest.starts_with(ESC) {
            if let Some(len) = sgr_len(rest) {
                rest = &rest[len..];
                continue;
            }
            rest = &rest[ESC.len_utf8()..];
            continue;
        }
        let run = match rest.find(ESC) {
            Some(i) => &rest[..i],
            None => rest,
        };
        out.push_str(run);
        rest = &rest[run.len()..];
    }
    out
}
