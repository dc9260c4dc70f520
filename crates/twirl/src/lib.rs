#![forbid(unsafe_code)]

//! Compiler and runner for precomputed terminal spinner animations.
//!
//! A spinner is described declaratively as cycles of text frames. The
//! compiler normalizes every frame into display cells of known column
//! width, applies a small algebra of structural transforms (substitution,
//! pacing, reshaping, transposition, randomization), enforces a strict
//! uniform-width invariant, and produces a frozen frame table. The
//! runner then serves one cycle per invocation with zero per-frame
//! overhead, selecting cycles sequentially or at random.
//!
//! # Example
//! ```
//! use twirl::{Command, SpinnerBuilder, SpinnerSource};
//!
//! let source = SpinnerSource::from_cycles(
//!     4,
//!     vec![vec!["[--]".into(), "[==]".into()]],
//! );
//! let mut runner = SpinnerBuilder::new(source)
//!     .schedule(Command::substitute("-", "="))?
//!     .compile(None)?;
//!
//! assert_eq!(runner.length(), 4);
//! let frame = runner.invoke().next().unwrap();
//! assert_eq!(twirl_cells::join(frame), "[==]");
//! # Ok::<(), twirl::SpinnerError>(())
//! ```
//!
//! Diagnostics live on the runner: `runner.check(1)` prints the compiled
//! specs and frame table, and `check(3)` replays the animation live.

pub mod check;
pub mod commands;
mod compiler;
pub mod controller;
pub mod error;
pub mod frames;
pub mod runner;
pub mod source;
pub mod spec;

pub use commands::{Command, PAUSE_EDGES_DEFAULT, PAUSE_MIDDLE_DEFAULT, Phase};
pub use controller::SpinnerBuilder;
pub use error::{Result, SpinnerError};
pub use runner::{CycleFrames, SpinnerRunner};
pub use source::{ParamKind, ParamScope, ParamSpec, ParamValue, Params, SpinnerSource};
pub use spec::Spec;
