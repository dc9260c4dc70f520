#![forbid(unsafe_code)]

//! The spinner builder.
//!
//! A [`SpinnerBuilder`] progressively binds configuration onto a raw
//! frame source: style parameters, then operational parameters, then an
//! ordered list of scheduled commands. Every binding step validates its
//! arguments eagerly and returns a *new* builder sharing the prior
//! bindings; a previously returned builder is never retroactively
//! altered, so intermediate builders can be kept and re-specialized
//! freely.
//!
//! Compilation itself happens on demand in
//! [`SpinnerBuilder::compile`] and always runs from scratch; callers
//! wanting reuse cache the returned runner.

use std::sync::Arc;

use crate::commands::{Command, Phase};
use crate::compiler;
use crate::error::Result;
use crate::runner::SpinnerRunner;
use crate::source::{ParamScope, Params, SpinnerSource};

/// Immutable builder binding configuration to a spinner source.
#[derive(Debug, Clone)]
pub struct SpinnerBuilder {
    source: Arc<SpinnerSource>,
    style: Params,
    operational: Params,
    pre: Vec<Command>,
    post: Vec<Command>,
}

impl SpinnerBuilder {
    /// Start building over a raw frame source.
    #[must_use]
    pub fn new(source: SpinnerSource) -> Self {
        Self {
            source: Arc::new(source),
            style: Params::new(),
            operational: Params::new(),
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Bind the author-chosen style parameters.
    ///
    /// The whole style set is validated eagerly against the source's
    /// declared parameters (unknown name, wrong kind, missing required)
    /// and replaces any previously bound style set.
    pub fn bind(&self, params: Params) -> Result<Self> {
        self.source.validate(ParamScope::Style, &params)?;
        let mut next = self.clone();
        next.style = params;
        Ok(next)
    }

    /// Bind the later-bound operational parameters (notably sizing
    /// inputs supplied by the hosting progress bar), validated the same
    /// way as [`bind`](Self::bind).
    pub fn with_operational(&self, params: Params) -> Result<Self> {
        self.source.validate(ParamScope::Operational, &params)?;
        let mut next = self.clone();
        next.operational = params;
        Ok(next)
    }

    /// Schedule a command for the next compilation.
    ///
    /// Arguments are validated now, at scheduling time; a bad argument
    /// fails this call, never the later compile. The command joins the
    /// pre or post list according to its phase, in call order.
    pub fn schedule(&self, command: Command) -> Result<Self> {
        command.validate()?;
        let mut next = self.clone();
        match command.phase() {
            Phase::Pre => next.pre.push(command),
            Phase::Post => next.post.push(command),
        }
        Ok(next)
    }

    /// Compile into a runner at the given display length (`None` for the
    /// source's natural length).
    ///
    /// Recompiles from scratch on every call. Required parameters that
    /// were never bound are reported here as binding errors, since this
    /// is the first call that needs them.
    pub fn compile(&self, actual_length: Option<usize>) -> Result<SpinnerRunner> {
        self.source.validate(ParamScope::Style, &self.style)?;
        self.source
            .validate(ParamScope::Operational, &self.operational)?;

        let actual = actual_length.unwrap_or_else(|| self.source.natural());
        let mut params = self.style.clone();
        params.extend(self.operational.clone());

        tracing::debug!(
            source = self.source.name(),
            actual,
            pre = self.pre.len(),
            post = self.post.len(),
            "compiling spinner"
        );
        let raw = self.source.produce(actual, &params);
        let spec = compiler::compile(raw, self.source.natural(), &self.pre)?;
        Ok(SpinnerRunner::new(spec, &self.post))
    }

    /// Compile at the natural length and print the checker report.
    ///
    /// Returns the compiled runner so callers can keep playing with it.
    pub fn check_and_run(&self, verbosity: u8) -> Result<SpinnerRunner> {
        let mut runner = self.compile(None)?;
        runner.check(verbosity);
        Ok(runner)
    }

    /// The underlying source.
    #[must_use]
    pub fn source(&self) -> &SpinnerSource {
        &self.source
    }
}
