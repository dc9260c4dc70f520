#![forbid(unsafe_code)]

//! Ahead-of-time spinner compilation.
//!
//! Compilation materializes the raw cycles eagerly (the source is
//! consumed once, the frames replay indefinitely), applies the scheduled
//! pre-commands in order, normalizes every frame, derives the metadata,
//! and enforces the uniform-width invariant. The output is a frozen
//! [`Spec`] ready to be wrapped by a runner.

use std::time::Instant;

use twirl_cells::{Frame, frame_width, normalize, split};

use crate::check::render_frames;
use crate::commands::Command;
use crate::error::{Result, SpinnerError};
use crate::spec::Spec;

/// Compile raw cycles into a finalized [`Spec`].
pub(crate) fn compile(
    raw: Vec<Vec<String>>,
    natural: usize,
    pre: &[Command],
) -> Result<Spec> {
    let started = Instant::now();

    let mut data: Vec<Vec<Frame>> = raw
        .into_iter()
        .map(|cycle| cycle.iter().map(|frame| split(frame)).collect())
        .collect();

    for command in pre {
        command.apply_pre(&mut data);
    }

    // Commands splice frames through text surgery; rebuild cell
    // boundaries once before measuring anything.
    for cycle in &mut data {
        for frame in cycle.iter_mut() {
            *frame = normalize(frame);
        }
    }

    if data.is_empty() || data.iter().any(Vec::is_empty) {
        return Err(SpinnerError::Specification {
            detail: "spinner produced no frames".into(),
            dump: String::new(),
        });
    }

    let frame_counts: Vec<usize> = data.iter().map(Vec::len).collect();
    let total_frames = frame_counts.iter().sum();
    let cycle_count = data.len();
    let length = frame_width(&data[0][0]);

    let spec = Spec {
        data,
        natural,
        length,
        frame_counts,
        total_frames,
        cycle_count,
        display_cycles: cycle_count,
        randomize: false,
        compile_time: started.elapsed(),
    };

    for (c, cycle) in spec.data.iter().enumerate() {
        for (f, frame) in cycle.iter().enumerate() {
            let width = frame_width(frame);
            if width != length {
                return Err(SpinnerError::Specification {
                    detail: format!(
                        "different cell widths detected: cycle {} frame {} \
                         has width {width}, expected {length}",
                        c + 1,
                        f + 1,
                    ),
                    dump: render_frames(&spec, true),
                });
            }
        }
    }

    tracing::debug!(
        cycles = spec.cycle_count,
        total_frames = spec.total_frames,
        length = spec.length,
        elapsed = ?spec.compile_time,
        "spinner compiled"
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cycles: &[&[&str]]) -> Vec<Vec<String>> {
        cycles
            .iter()
            .map(|cycle| cycle.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn derives_metadata() {
        let spec = compile(raw(&[&["ab", "cd"], &["ef"]]), 2, &[]).unwrap();
        assert_eq!(spec.length(), 2);
        assert_eq!(spec.natural(), 2);
        assert_eq!(spec.cycle_count(), 2);
        assert_eq!(spec.display_cycles(), 2);
        assert_eq!(spec.frame_counts(), &[2, 1]);
        assert_eq!(spec.total_frames(), 3);
        assert!(!spec.is_randomized());
    }

    #[test]
    fn wide_cells_count_two_columns() {
        let spec = compile(raw(&[&["漢漢", "abcd"]]), 4, &[]).unwrap();
        assert_eq!(spec.length(), 4);
        assert_eq!(spec.data()[0][0].len(), 2);
        assert_eq!(spec.data()[0][1].len(), 4);
    }

    #[test]
    fn width_mismatch_is_specification_error() {
        let err = compile(raw(&[&["abcd", "abcde"]]), 4, &[]).unwrap_err();
        match err {
            SpinnerError::Specification { detail, dump } => {
                assert!(detail.contains("cycle 1 frame 2"));
                assert!(detail.contains("width 5, expected 4"));
                // The dump is the checker's frame rendition.
                assert!(dump.contains("abcd"));
                assert!(dump.contains("abcde"));
            }
            other => panic!("expected specification error, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_specification_error() {
        assert!(compile(Vec::new(), 1, &[]).is_err());
        assert!(compile(raw(&[&[]]), 1, &[]).is_err());
    }

    #[test]
    fn pre_commands_compose_in_order() {
        // substitute runs before pause, so the repeated edges carry the
        // substituted text.
        let pre = [Command::substitute("-", "="), Command::pause(2, 1)];
        let spec = compile(raw(&[&["[-]", "[x]"]]), 3, &pre).unwrap();
        let first = twirl_cells::join(&spec.data()[0][0]);
        assert_eq!(first, "[=]");
        assert_eq!(spec.frame_counts(), &[4]);
    }

    #[test]
    fn substitution_can_break_the_invariant() {
        let pre = [Command::substitute("-", "--")];
        let err = compile(raw(&[&["a-b", "axc"]]), 3, &pre).unwrap_err();
        assert!(matches!(err, SpinnerError::Specification { .. }));
    }
}
