#![forbid(unsafe_code)]

//! The compiled animation artifact.

use std::time::Duration;

use twirl_cells::Frame;

/// A fully compiled, frozen spinner animation.
///
/// Constructed once by the compiler; the frame table is mutated only by
/// pre-commands during compilation, and the runtime metadata only by
/// post-commands immediately after. Thereafter the spec is read-only and
/// owned exclusively by the runner that wraps it.
#[derive(Debug, Clone)]
pub struct Spec {
    pub(crate) data: Vec<Vec<Frame>>,
    pub(crate) natural: usize,
    pub(crate) length: usize,
    pub(crate) frame_counts: Vec<usize>,
    pub(crate) total_frames: usize,
    pub(crate) cycle_count: usize,
    pub(crate) display_cycles: usize,
    pub(crate) randomize: bool,
    pub(crate) compile_time: Duration,
}

impl Spec {
    /// The compiled frame table: cycles of frames of cells.
    #[must_use]
    pub fn data(&self) -> &[Vec<Frame>] {
        &self.data
    }

    /// The author-declared intended display width.
    #[must_use]
    pub fn natural(&self) -> usize {
        self.natural
    }

    /// The actual uniform frame width in terminal columns.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Frame count of each cycle.
    #[must_use]
    pub fn frame_counts(&self) -> &[usize] {
        &self.frame_counts
    }

    /// Total frame count across all cycles.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Number of compiled cycles.
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Reported cycle count.
    ///
    /// Equal to [`cycle_count`](Self::cycle_count) unless overridden by
    /// the randomize post-command.
    #[must_use]
    pub fn display_cycles(&self) -> usize {
        self.display_cycles
    }

    /// Whether the runner selects cycles at random.
    #[must_use]
    pub fn is_randomized(&self) -> bool {
        self.randomize
    }

    /// How long compilation took.
    #[must_use]
    pub fn compile_time(&self) -> Duration {
        self.compile_time
    }
}
