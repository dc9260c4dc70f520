#![forbid(unsafe_code)]

//! The closed table of spinner transform commands.
//!
//! Commands are scheduled on the builder and applied around compilation:
//! pre-commands rewrite the frame table before the uniform-width check,
//! the post-command adjusts runtime metadata on the finished spec. The
//! set is a closed enum so it is statically enumerable and every variant
//! is exhaustively testable; there is no runtime registry.
//!
//! Pre-commands compose left to right in scheduling order; each one
//! replaces the frame table wholesale and never re-checks widths itself.
//! The compiler's invariant check catches any mismatch they introduce.

use twirl_cells::{Frame, join, split};

use crate::error::{Result, SpinnerError};
use crate::spec::Spec;

/// Default edge-frame repeat count for [`Command::pause`].
pub const PAUSE_EDGES_DEFAULT: usize = 6;

/// Default interior-frame repeat count for [`Command::pause`].
pub const PAUSE_MIDDLE_DEFAULT: usize = 1;

/// When a command runs relative to compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rewrites frame data before the width invariant is checked.
    Pre,
    /// Adjusts runtime metadata/policy on the finished spec.
    Post,
}

/// A scheduled spinner transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Literal substring replacement across every frame's rendition.
    Substitute {
        /// Text to find.
        old: String,
        /// Replacement text.
        new: String,
    },
    /// Repeat edge and interior frames of each cycle.
    Pause {
        /// Repeat count for the first and last frame of a cycle.
        edges: usize,
        /// Repeat count for interior frames.
        middle: usize,
    },
    /// Regroup all frames into cycles of a fixed size.
    Reshape {
        /// Frames per regrouped cycle.
        group: usize,
    },
    /// Exchange cycle and frame indices of the frame matrix.
    Transpose,
    /// Switch the runner to random cycle selection.
    Randomize {
        /// Optional reported cycle count override; zero or `None` keeps
        /// the actual count.
        cycles: Option<usize>,
    },
}

impl Command {
    /// Replace every occurrence of `old` with `new` in each frame.
    pub fn substitute(old: impl Into<String>, new: impl Into<String>) -> Self {
        Command::Substitute {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Repeat the first and last frame of each cycle `edges` times and
    /// interior frames `middle` times. Both counts are floored to 1.
    #[must_use]
    pub fn pause(edges: usize, middle: usize) -> Self {
        Command::Pause { edges, middle }
    }

    /// [`pause`](Self::pause) with the original defaults (6, 1).
    #[must_use]
    pub fn pause_default() -> Self {
        Command::Pause {
            edges: PAUSE_EDGES_DEFAULT,
            middle: PAUSE_MIDDLE_DEFAULT,
        }
    }

    /// Regroup all frames, in cycle-then-frame order, into cycles of
    /// `group` consecutive frames. A final short group is kept.
    #[must_use]
    pub fn reshape(group: usize) -> Self {
        Command::Reshape { group }
    }

    /// Transpose the frame matrix.
    ///
    /// Well-defined only for a uniform frame count per cycle; ragged
    /// input is a precondition violation and yields an unspecified (but
    /// memory-safe) regrouping truncated at the shortest cycle.
    #[must_use]
    pub fn transpose() -> Self {
        Command::Transpose
    }

    /// Play compiled cycles in random order; optionally override the
    /// reported cycle count.
    #[must_use]
    pub fn randomize(cycles: Option<usize>) -> Self {
        Command::Randomize { cycles }
    }

    /// Command name as scheduled, for error messages and diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Substitute { .. } => "substitute",
            Command::Pause { .. } => "pause",
            Command::Reshape { .. } => "reshape",
            Command::Transpose => "transpose",
            Command::Randomize { .. } => "randomize",
        }
    }

    /// Which side of compilation this command runs on.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Command::Randomize { .. } => Phase::Post,
            _ => Phase::Pre,
        }
    }

    /// Validate arguments at scheduling time.
    ///
    /// Never deferred: a bad argument fails the `schedule` call itself.
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Command::Substitute { old, .. } if old.is_empty() => Err(SpinnerError::Binding {
                target: "substitute",
                detail: "old text must not be empty".into(),
            }),
            Command::Reshape { group: 0 } => Err(SpinnerError::Binding {
                target: "reshape",
                detail: "group size must be positive".into(),
            }),
            _ => Ok(()),
        }
    }

    /// Apply a pre-command to the in-progress frame table.
    pub(crate) fn apply_pre(&self, data: &mut Vec<Vec<Frame>>) {
        match self {
            Command::Substitute { old, new } => {
                for cycle in data.iter_mut() {
                    for frame in cycle.iter_mut() {
                        *frame = split(&join(frame).replace(old.as_str(), new));
                    }
                }
            }
            Command::Pause { edges, middle } => {
                let (edges, middle) = ((*edges).max(1), (*middle).max(1));
                for cycle in data.iter_mut() {
                    let Some(last) = cycle.len().checked_sub(1) else {
                        continue;
                    };
                    *cycle = cycle
                        .iter()
                        .enumerate()
                        .flat_map(|(i, frame)| {
                            let repeat = if i == 0 || i == last { edges } else { middle };
                            std::iter::repeat_n(frame.clone(), repeat)
                        })
                        .collect();
                }
            }
            Command::Reshape { group } => {
                let flat: Vec<Frame> = std::mem::take(data).into_iter().flatten().collect();
                *data = flat.chunks(*group).map(<[Frame]>::to_vec).collect();
            }
            Command::Transpose => {
                let rows = std::mem::take(data);
                let cols = rows.iter().map(Vec::len).min().unwrap_or(0);
                *data = (0..cols)
                    .map(|j| rows.iter().map(|row| row[j].clone()).collect())
                    .collect();
            }
            Command::Randomize { .. } => {}
        }
    }

    /// Apply a post-command to the finished spec's metadata.
    pub(crate) fn apply_post(&self, spec: &mut Spec) {
        if let Command::Randomize { cycles } = self {
            spec.randomize = true;
            if let Some(n) = cycles {
                if *n > 0 {
                    spec.display_cycles = *n;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use twirl_cells::frame_width;

    fn table(cycles: &[&[&str]]) -> Vec<Vec<Frame>> {
        cycles
            .iter()
            .map(|cycle| cycle.iter().map(|f| split(f)).collect())
            .collect()
    }

    fn texts(data: &[Vec<Frame>]) -> Vec<Vec<String>> {
        data.iter()
            .map(|cycle| cycle.iter().map(|f| join(f)).collect())
            .collect()
    }

    #[test]
    fn phases_match_the_table() {
        assert_eq!(Command::substitute("-", "=").phase(), Phase::Pre);
        assert_eq!(Command::pause_default().phase(), Phase::Pre);
        assert_eq!(Command::reshape(3).phase(), Phase::Pre);
        assert_eq!(Command::transpose().phase(), Phase::Pre);
        assert_eq!(Command::randomize(None).phase(), Phase::Post);
    }

    #[test]
    fn validate_rejects_empty_substitute_old() {
        assert!(Command::substitute("", "x").validate().is_err());
        assert!(Command::substitute("x", "").validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_reshape_group() {
        assert!(Command::reshape(0).validate().is_err());
        assert!(Command::reshape(1).validate().is_ok());
    }

    #[test]
    fn substitute_rewrites_every_frame() {
        let mut data = table(&[&["[--]", "[=-]"]]);
        Command::substitute("-", "=").apply_pre(&mut data);
        assert_eq!(texts(&data), vec![vec!["[==]".to_string(), "[==]".into()]]);
    }

    #[test]
    fn substitute_replaces_all_occurrences() {
        let mut data = table(&[&["-a-b-"]]);
        Command::substitute("-", "_").apply_pre(&mut data);
        assert_eq!(texts(&data), vec![vec!["_a_b_".to_string()]]);
    }

    #[test]
    fn pause_repeats_edges_and_middle() {
        let mut data = table(&[&["a", "b", "c"]]);
        Command::pause(2, 1).apply_pre(&mut data);
        assert_eq!(texts(&data), vec![vec![
            "a".to_string(),
            "a".into(),
            "b".into(),
            "c".into(),
            "c".into(),
        ]]);
    }

    #[test]
    fn pause_one_one_is_identity() {
        let original = table(&[&["a", "b"], &["c"]]);
        let mut data = original.clone();
        Command::pause(1, 1).apply_pre(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn pause_floors_counts_to_one() {
        let original = table(&[&["a", "b", "c"]]);
        let mut data = original.clone();
        Command::pause(0, 0).apply_pre(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn pause_single_frame_cycle_counts_as_both_edges() {
        let mut data = table(&[&["x"]]);
        Command::pause(3, 1).apply_pre(&mut data);
        assert_eq!(data[0].len(), 3);
    }

    #[test]
    fn reshape_groups_flattened_frames() {
        let mut data = table(&[&["a", "b"], &["c", "d"]]);
        Command::reshape(3).apply_pre(&mut data);
        let sizes: Vec<usize> = data.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 1]);
        assert_eq!(texts(&data), vec![
            vec!["a".to_string(), "b".into(), "c".into()],
            vec!["d".to_string()],
        ]);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let mut data = table(&[&["a", "b"], &["c", "d"]]);
        Command::transpose().apply_pre(&mut data);
        assert_eq!(texts(&data), vec![
            vec!["a".to_string(), "c".into()],
            vec!["b".to_string(), "d".into()],
        ]);
    }

    #[test]
    fn randomize_sets_policy_only() {
        let mut spec = Spec {
            data: table(&[&["a"], &["b"]]),
            natural: 1,
            length: 1,
            frame_counts: vec![1, 1],
            total_frames: 2,
            cycle_count: 2,
            display_cycles: 2,
            randomize: false,
            compile_time: std::time::Duration::ZERO,
        };
        Command::randomize(None).apply_post(&mut spec);
        assert!(spec.randomize);
        assert_eq!(spec.display_cycles, 2);

        Command::randomize(Some(0)).apply_post(&mut spec);
        assert_eq!(spec.display_cycles, 2);

        Command::randomize(Some(7)).apply_post(&mut spec);
        assert_eq!(spec.display_cycles, 7);
        assert_eq!(spec.cycle_count, 2);
        assert_eq!(spec.data.len(), 2);
    }

    fn rectangular_table() -> impl Strategy<Value = Vec<Vec<Frame>>> {
        let frame = prop_oneof![Just("ab"), Just("cd"), Just("e漢"), Just("--")];
        (1usize..5, 1usize..5).prop_flat_map(move |(cycles, frames)| {
            proptest::collection::vec(
                proptest::collection::vec(frame.clone().prop_map(|t| split(t)), frames),
                cycles,
            )
        })
    }

    proptest! {
        #[test]
        fn reshape_conserves_total_frames(data in rectangular_table(), group in 1usize..7) {
            let before: usize = data.iter().map(Vec::len).sum();
            let mut data = data;
            Command::reshape(group).apply_pre(&mut data);
            let after: usize = data.iter().map(Vec::len).sum();
            prop_assert_eq!(before, after);
            prop_assert!(data.iter().all(|cycle| cycle.len() <= group));
        }

        #[test]
        fn transpose_twice_is_identity(data in rectangular_table()) {
            let original = data.clone();
            let mut data = data;
            Command::transpose().apply_pre(&mut data);
            Command::transpose().apply_pre(&mut data);
            prop_assert_eq!(data, original);
        }

        #[test]
        fn pause_preserves_frame_widths(data in rectangular_table(),
                                        edges in 0usize..4, middle in 0usize..4) {
            let widths: Vec<usize> = data
                .iter()
                .flat_map(|c| c.iter().map(|f| frame_width(f)))
                .collect();
            let mut data = data;
            Command::pause(edges, middle).apply_pre(&mut data);
            for frame in data.iter().flatten() {
                prop_assert!(widths.contains(&frame_width(frame)));
            }
        }
    }
}
