#![forbid(unsafe_code)]

//! Diagnostic inspection and live replay of compiled spinners.
//!
//! The checker prints a compiled spinner's specs and, at higher
//! verbosity, unfolds the frame table, reveals per-cell codepoints, and
//! drives a live terminal replay. The frame renderer here is also what
//! the compiler embeds in specification errors, so a failed compile and
//! a manual `check` show the same rendition.
//!
//! Verbosity levels:
//!
//! ```text
//!          0 for specs only (default)
//!            /                 \
//!           /           3 to include animation
//!          /                      \
//! 1 to unfold frame data  ----  4 to unfold frame data
//!          |                      |
//! 2 to reveal codepoints  ----  5 to reveal codepoints
//! ```

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::time::Duration;

use crossterm::style::Stylize;
use twirl_cells::{CursorGuard, Frame, clear_line, join, strip_decoration};

use crate::runner::SpinnerRunner;
use crate::spec::Spec;

/// Fixed replay interval (~15 frames per second, as the original tool).
const FRAME_INTERVAL: Duration = Duration::from_millis(66);

/// Print a compiled spinner's specs at the given verbosity (clamped to
/// 0..=5). Levels 3..=5 block in the live replay loop until interrupted.
pub fn check(runner: &mut SpinnerRunner, verbosity: u8) {
    let verbosity = verbosity.min(5);
    let mut report = String::new();
    if matches!(verbosity, 1 | 2 | 4 | 5) {
        report.push_str(&render_frames(runner.spec(), matches!(verbosity, 2 | 5)));
    }
    report.push_str(&render_specs(runner, verbosity));
    print!("{report}");
    if matches!(verbosity, 3..=5) {
        animate(runner);
    }
}

/// Render the frame table, column-aligned, with per-cycle and
/// whole-sequence indices. Shared with specification error dumps.
pub(crate) fn render_frames(spec: &Spec, show_codepoints: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", section("Frame data"));

    let index_width = 1 + digits(spec.frame_counts().iter().copied().max().unwrap_or(0));
    let whole_width = digits(spec.total_frames());
    let mut whole = 0usize;

    for (c, cycle) in spec.data().iter().enumerate() {
        if c > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "cycle {}", c + 1);
        for (f, frame) in cycle.iter().enumerate() {
            whole += 1;
            let plain = strip_decoration(frame);
            let per_cycle = format!("{:>index_width$}", f + 1);
            let sequence = format!("{whole:<whole_width$}");
            let _ = write!(
                out,
                "{} |{}| {}",
                per_cycle.dim(),
                join(&plain),
                sequence.dim(),
            );
            if show_codepoints {
                out.push_str(&format_codepoints(&plain));
            }
            out.push('\n');
        }
    }
    out
}

/// Render the specs block: compile time, a usage hint, and the metadata.
pub(crate) fn render_specs(runner: &SpinnerRunner, verbosity: u8) -> String {
    let spec = runner.spec();
    let mut out = String::new();
    let elapsed = format!("{:.2?}", spec.compile_time());
    let _ = writeln!(out, "\nAll frames compiled in: {}", elapsed.green());
    let _ = writeln!(out, "(call {})", hint(verbosity));
    let _ = writeln!(out, "\n{}", section("Specs"));
    let _ = writeln!(
        out,
        "{}: {} ({}: {})",
        label("length"),
        spec.length(),
        label("natural"),
        spec.natural(),
    );
    let _ = writeln!(
        out,
        "{}: {} ({})",
        label("cycles"),
        spec.display_cycles(),
        runner.selection_name(),
    );
    let _ = writeln!(out, "{}: {:?}", label("frames"), spec.frame_counts());
    let _ = writeln!(out, "{}: {}", label("total_frames"), spec.total_frames());
    out
}

/// Per-cell hex codepoint dump of one (already stripped) frame.
fn format_codepoints(frame: &Frame) -> String {
    let total: usize = frame.iter().map(|cell| cell.plain().chars().count()).sum();
    let codes = frame
        .iter()
        .map(|cell| {
            let hex = cell
                .plain()
                .chars()
                .map(|ch| format!("{:x}", u32::from(ch)))
                .collect::<Vec<_>>()
                .join(" ");
            if cell.is_wide() {
                hex.dark_yellow().to_string()
            } else {
                hex.blue().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    format!(" -> {}:[{codes}]", total.to_string().red())
}

/// Live replay loop: reprints the current frame in place, tagged with
/// cycle/frame indices, until externally interrupted. The cursor is
/// hidden for the duration and restored on every exit path by the
/// guard's drop.
fn animate(runner: &mut SpinnerRunner) {
    println!("\n{}", section("Animation"));
    let cycle_width = digits(runner.cycle_count());
    let frame_digits = digits(runner.spec().frame_counts().iter().copied().max().unwrap_or(0));

    let interrupted = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    #[cfg(unix)]
    let _ = signal_hook::flag::register(
        signal_hook::consts::SIGINT,
        std::sync::Arc::clone(&interrupted),
    );

    let _guard = CursorGuard::hide();
    let mut stdout = io::stdout();
    'replay: while !interrupted.load(std::sync::atomic::Ordering::Relaxed) {
        let frames = runner.invoke();
        let cycle = frames.cycle_index() + 1;
        for (f, frame) in frames.enumerate() {
            if interrupted.load(std::sync::atomic::Ordering::Relaxed) {
                break 'replay;
            }
            clear_line();
            let ci = format!("{cycle:>cycle_width$}");
            let fi = format!("{:>frame_digits$}", f + 1);
            let _ = write!(
                stdout,
                "\r{}:{} -->{}<-- {}",
                ci.cyan(),
                fi.cyan(),
                join(frame),
                "(press CTRL+C to stop)".dim(),
            );
            let _ = stdout.flush();
            std::thread::sleep(FRAME_INTERVAL);
        }
    }
    let _ = writeln!(stdout);
}

fn section(title: &str) -> String {
    title.dark_yellow().bold().to_string()
}

fn label(name: &str) -> String {
    name.yellow().bold().to_string()
}

fn hint(verbosity: u8) -> &'static str {
    match verbosity {
        0 => ".check(1) to unfold frame data, or .check(3) to include animation",
        1 => {
            ".check(2) to reveal codepoints, or .check(4) to include animation, \
             or .check(0) to fold up frame data"
        }
        2 => ".check(5) to include animation, or .check(1) to hide codepoints",
        3 => ".check(4) to unfold frame data, or .check(0) to omit animation",
        4 => {
            ".check(5) to reveal codepoints, or .check(1) to omit animation, \
             or .check(3) to fold up frame data"
        }
        _ => ".check(2) to omit animation, or .check(4) to hide codepoints",
    }
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}
