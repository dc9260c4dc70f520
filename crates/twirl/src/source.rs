#![forbid(unsafe_code)]

//! Raw frame sources and their declared parameters.
//!
//! A [`SpinnerSource`] is the author-supplied definition of an animation:
//! a natural display width, a table of declared parameters, and a producer
//! that yields raw cycles of text frames for a requested display length.
//! The parameter table is what makes eager binding validation possible:
//! the builder checks supplied arguments against it at call time instead
//! of letting a bad name or type surface deep inside compilation.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SpinnerError};

/// Expected type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer argument.
    Int,
    /// Floating point argument.
    Float,
    /// Boolean argument.
    Bool,
    /// Text argument.
    Text,
}

impl ParamKind {
    fn name(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Text => "text",
        }
    }
}

/// When a parameter is bound.
///
/// Style parameters are chosen by the author when defining a spinner;
/// operational parameters are bound later by the hosting progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamScope {
    /// Bound through [`SpinnerBuilder::bind`](crate::SpinnerBuilder::bind).
    Style,
    /// Bound through
    /// [`SpinnerBuilder::with_operational`](crate::SpinnerBuilder::with_operational).
    Operational,
}

impl ParamScope {
    fn name(self) -> &'static str {
        match self {
            ParamScope::Style => "style",
            ParamScope::Operational => "operational",
        }
    }
}

/// One declared parameter of a [`SpinnerSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name as supplied in a [`Params`] map.
    pub name: &'static str,
    /// Binding scope.
    pub scope: ParamScope,
    /// Expected value type.
    pub kind: ParamKind,
    /// Whether binding without this parameter is an error.
    pub required: bool,
}

impl ParamSpec {
    /// Declare an optional style parameter.
    #[must_use]
    pub const fn style(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            scope: ParamScope::Style,
            kind,
            required: false,
        }
    }

    /// Declare an optional operational parameter.
    #[must_use]
    pub const fn operational(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            scope: ParamScope::Operational,
            kind,
            required: false,
        }
    }

    /// Mark this parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Text value.
    Text(String),
}

impl ParamValue {
    /// The kind of this value, for validation against a [`ParamSpec`].
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Bound parameters, keyed by declared name.
pub type Params = BTreeMap<String, ParamValue>;

type Producer = dyn Fn(usize, &Params) -> Vec<Vec<String>> + Send + Sync;

/// The author-supplied definition of a spinner animation.
pub struct SpinnerSource {
    name: &'static str,
    natural: usize,
    params: Vec<ParamSpec>,
    produce: Box<Producer>,
}

impl fmt::Debug for SpinnerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerSource")
            .field("name", &self.name)
            .field("natural", &self.natural)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl SpinnerSource {
    /// Create a source from a producer closure.
    ///
    /// The producer receives the actual display length and the merged
    /// bound parameters, and returns raw cycles of text frames.
    pub fn new<F>(
        name: &'static str,
        natural: usize,
        params: Vec<ParamSpec>,
        produce: F,
    ) -> Self
    where
        F: Fn(usize, &Params) -> Vec<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name,
            natural,
            params,
            produce: Box::new(produce),
        }
    }

    /// Create a parameterless source from a fixed cycle table.
    ///
    /// The table is produced as-is regardless of the requested length;
    /// sizing to the actual length is the author's concern here.
    pub fn from_cycles(natural: usize, cycles: Vec<Vec<String>>) -> Self {
        Self::new("cycles", natural, Vec::new(), move |_, _| cycles.clone())
    }

    /// Create a single-cycle source from a list of frames.
    ///
    /// The natural length is the widest frame; narrower frames are padded
    /// with trailing spaces so the cycle compiles uniformly. Pairs with
    /// the frame sets in [`frames`](crate::frames).
    pub fn frames(frames: &[&str]) -> Self {
        let natural = frames
            .iter()
            .map(|f| twirl_cells::frame_width(&twirl_cells::split(f)))
            .max()
            .unwrap_or(0);
        let cycle: Vec<String> = frames
            .iter()
            .map(|f| {
                let width = twirl_cells::frame_width(&twirl_cells::split(f));
                format!("{f}{}", " ".repeat(natural - width))
            })
            .collect();
        Self::new("frames", natural, Vec::new(), move |_, _| {
            vec![cycle.clone()]
        })
    }

    /// The source name, used in binding error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The author-declared intended display width.
    #[must_use]
    pub fn natural(&self) -> usize {
        self.natural
    }

    /// The declared parameter table.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Produce the raw cycles for a display length.
    pub(crate) fn produce(&self, actual_length: usize, params: &Params) -> Vec<Vec<String>> {
        (self.produce)(actual_length, params)
    }

    /// Validate supplied parameters of one scope against the declaration.
    ///
    /// Checks, in order: unknown names, wrong scope, wrong kind, and
    /// missing required parameters. Any failure is a binding error.
    pub(crate) fn validate(&self, scope: ParamScope, supplied: &Params) -> Result<()> {
        for (name, value) in supplied {
            let Some(spec) = self.params.iter().find(|p| p.name == name.as_str()) else {
                return Err(SpinnerError::Binding {
                    target: self.name,
                    detail: format!("unknown parameter `{name}`"),
                });
            };
            if spec.scope != scope {
                return Err(SpinnerError::Binding {
                    target: self.name,
                    detail: format!(
                        "parameter `{name}` is {}, not {}",
                        spec.scope.name(),
                        scope.name()
                    ),
                });
            }
            if spec.kind != value.kind() {
                return Err(SpinnerError::Binding {
                    target: self.name,
                    detail: format!(
                        "parameter `{name}` expects {}, got {}",
                        spec.kind.name(),
                        value.kind().name()
                    ),
                });
            }
        }
        for spec in self.params.iter().filter(|p| p.scope == scope && p.required) {
            if !supplied.contains_key(spec.name) {
                return Err(SpinnerError::Binding {
                    target: self.name,
                    detail: format!(
                        "missing required {} parameter `{}`",
                        scope.name(),
                        spec.name
                    ),
                });
            }
        }
        Ok(())
    }
}
