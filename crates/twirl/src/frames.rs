#![forbid(unsafe_code)]

//! Built-in frame sets.
//!
//! Ready-made single-cycle frame lists for
//! [`SpinnerSource::frames`](crate::SpinnerSource::frames).

/// Braille dot spinner animation frames.
pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII line spinner animation frames.
pub const LINE: &[&str] = &["|", "/", "-", "\\"];

#[cfg(test)]
mod tests {
    use super::*;
    use twirl_cells::{frame_width, split};

    #[test]
    fn built_in_frames_are_uniform_width() {
        for set in [DOTS, LINE] {
            for frame in set {
                assert_eq!(frame_width(&split(frame)), 1);
            }
        }
    }
}
