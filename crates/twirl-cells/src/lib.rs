#![forbid(unsafe_code)]

//! Cell model and terminal control for the twirl spinner compiler.
//!
//! This crate provides the two leaf contracts the compiler builds on:
//! - [`cell`] - splitting text into atomic display cells with known
//!   terminal column widths (1 or 2), joining them back, and repairing
//!   frames after arbitrary text surgery
//! - [`terminal`] - cursor visibility, line clearing, and column count,
//!   all no-ops when stdout is not an interactive terminal
//!
//! # Example
//! ```
//! use twirl_cells::{frame_width, join, split};
//!
//! let frame = split("[••]");
//! assert_eq!(frame.len(), 4);
//! assert_eq!(frame_width(&frame), 4);
//! assert_eq!(join(&frame), "[••]");
//! ```

pub mod cell;
pub mod terminal;

pub use cell::{Cell, Frame, frame_width, join, normalize, split, strip_decoration};
pub use terminal::{CursorGuard, clear_line, columns, hide_cursor, show_cursor};
