#![forbid(unsafe_code)]

//! Stateful playback of a compiled spinner.
//!
//! A [`SpinnerRunner`] owns one frozen [`Spec`] and one persistent cycle
//! selection state. Each [`invoke`](SpinnerRunner::invoke) advances the
//! selection and returns a finite, single-pass iterator over exactly one
//! cycle's frames; the frames themselves were precomputed by the
//! compiler, so replay has zero per-frame overhead.
//!
//! The selection state is the only durable cross-call state in the
//! system. It is not synchronized: a runner is single-consumer, which
//! the `&mut self` receiver of `invoke` makes a compile-time guarantee.

use rand::Rng;
use rand::rngs::ThreadRng;

use twirl_cells::Frame;

use crate::check;
use crate::commands::Command;
use crate::spec::Spec;

/// Cycle selection policy, fixed at construction.
#[derive(Debug, Clone)]
pub(crate) enum Selection {
    /// Wrapping index: 0, 1, …, cycleCount-1, 0, …
    Sequential { next: usize },
    /// Independent uniform draws with replacement.
    Random { rng: ThreadRng },
}

impl Selection {
    /// Advance the state and return the next cycle index.
    pub(crate) fn select(&mut self, cycle_count: usize) -> usize {
        match self {
            Selection::Sequential { next } => {
                let index = *next;
                *next = (index + 1) % cycle_count;
                index
            }
            Selection::Random { rng } => rng.random_range(0..cycle_count),
        }
    }

    /// Policy name for diagnostics.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Selection::Sequential { .. } => "sequential",
            Selection::Random { .. } => "random",
        }
    }
}

/// A compiled spinner ready for playback.
#[derive(Debug, Clone)]
pub struct SpinnerRunner {
    spec: Spec,
    selection: Selection,
}

impl SpinnerRunner {
    /// Wrap a finalized spec, applying the scheduled post-commands.
    ///
    /// An empty post-command list leaves the default sequential policy.
    pub(crate) fn new(mut spec: Spec, post: &[Command]) -> Self {
        for command in post {
            command.apply_post(&mut spec);
        }
        let selection = if spec.randomize {
            Selection::Random { rng: rand::rng() }
        } else {
            Selection::Sequential { next: 0 }
        };
        Self { spec, selection }
    }

    /// Select the next cycle and return its frames.
    ///
    /// The returned iterator is finite and single-pass; call `invoke`
    /// again for a fresh cycle (sequential mode wraps, random mode
    /// re-rolls and may repeat a cycle consecutively).
    pub fn invoke(&mut self) -> CycleFrames<'_> {
        let cycle = self.selection.select(self.spec.cycle_count);
        CycleFrames {
            cycle,
            frames: self.spec.data[cycle].iter(),
        }
    }

    /// The wrapped spec's metadata, read-only.
    #[must_use]
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Uniform frame width in terminal columns.
    #[must_use]
    pub fn length(&self) -> usize {
        self.spec.length
    }

    /// Number of compiled cycles.
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.spec.cycle_count
    }

    /// Reported cycle count (see [`Spec::display_cycles`]).
    #[must_use]
    pub fn display_cycles(&self) -> usize {
        self.spec.display_cycles
    }

    /// Total frame count across all cycles.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.spec.total_frames
    }

    /// Whether cycles are selected at random.
    #[must_use]
    pub fn is_randomized(&self) -> bool {
        self.spec.randomize
    }

    /// Selection policy name ("sequential" or "random").
    #[must_use]
    pub fn selection_name(&self) -> &'static str {
        self.selection.name()
    }

    /// Print this spinner's specs and, at higher verbosity, its frame
    /// data, codepoints, and a live replay. See [`check`](crate::check).
    pub fn check(&mut self, verbosity: u8) {
        check::check(self, verbosity);
    }
}

/// Single-pass iterator over one cycle's frames.
#[derive(Debug)]
pub struct CycleFrames<'a> {
    cycle: usize,
    frames: std::slice::Iter<'a, Frame>,
}

impl CycleFrames<'_> {
    /// Index of the cycle being played.
    #[must_use]
    pub fn cycle_index(&self) -> usize {
        self.cycle
    }
}

impl<'a> Iterator for CycleFrames<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl ExactSizeIterator for CycleFrames<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler;

    fn runner(cycles: &[&[&str]], post: &[Command]) -> SpinnerRunner {
        let raw = cycles
            .iter()
            .map(|cycle| cycle.iter().map(|f| f.to_string()).collect())
            .collect();
        SpinnerRunner::new(compiler::compile(raw, 1, &[]).unwrap(), post)
    }

    #[test]
    fn sequential_wraps() {
        let mut runner = runner(&[&["a"], &["b"], &["c"]], &[]);
        let indices: Vec<usize> = (0..4).map(|_| runner.invoke().cycle_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    #[test]
    fn invoke_yields_cycle_frames_in_order() {
        let mut runner = runner(&[&["a", "b", "c"]], &[]);
        let texts: Vec<String> = runner.invoke().map(|f| twirl_cells::join(f)).collect();
        assert_eq!(texts, vec!["a".to_string(), "b".into(), "c".into()]);
    }

    #[test]
    fn invoke_is_finite_and_sized() {
        let mut runner = runner(&[&["a", "b"]], &[]);
        let frames = runner.invoke();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.count(), 2);
    }

    #[test]
    fn random_selection_stays_in_bounds() {
        let mut runner = runner(&[&["a"], &["b"], &["c"]], &[Command::randomize(None)]);
        assert!(runner.is_randomized());
        assert_eq!(runner.selection_name(), "random");
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let index = runner.invoke().cycle_index();
            assert!(index < 3);
            seen[index] = true;
        }
        // 1000 uniform draws over 3 cycles miss one with probability
        // ~3 * (2/3)^1000; treat a miss as a failure.
        assert!(seen.iter().filter(|&&s| s).count() > 1);
    }

    #[test]
    fn randomize_override_changes_reported_count_only() {
        let mut runner = runner(&[&["a"], &["b"]], &[Command::randomize(Some(9))]);
        assert_eq!(runner.display_cycles(), 9);
        assert_eq!(runner.cycle_count(), 2);
        for _ in 0..100 {
            assert!(runner.invoke().cycle_index() < 2);
        }
    }

    #[test]
    fn default_policy_is_sequential() {
        let runner = runner(&[&["a"]], &[]);
        assert_eq!(runner.selection_name(), "sequential");
        assert!(!runner.is_randomized());
    }

    #[test]
    fn single_cycle_sequential_repeats() {
        let mut runner = runner(&[&["a", "b"]], &[]);
        assert_eq!(runner.invoke().cycle_index(), 0);
        assert_eq!(runner.invoke().cycle_index(), 0);
    }
}
