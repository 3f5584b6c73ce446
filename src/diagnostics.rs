//! Advisory diagnostics reported while matching.
//!
//! Diagnostics are logging side effects, never part of the boolean result.
//! The sink is injectable so tests can capture messages without coupling to
//! a particular output stream; [`LogSink`] forwards to the `log` facade.
use std::fmt;

/// An advisory event produced during schema matching.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic<'a> {
    /// A schema path did not resolve in the document.
    MissingPath { path: &'a str },
    /// A condition used an operator outside the recognized set.
    UnsupportedOperator { name: &'a str },
    /// The schema's `match` value was neither `all` nor `any`.
    UnrecognizedMode { mode: &'a str },
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingPath { path } => {
                write!(f, "path '{}' does not exist in the document", path)
            }
            Diagnostic::UnsupportedOperator { name } => {
                write!(f, "unsupported operator '{}' used", name)
            }
            Diagnostic::UnrecognizedMode { mode } => {
                write!(f, "unrecognized match mode '{}'", mode)
            }
        }
    }
}

/// Receives advisory diagnostics during evaluation.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic<'_>);
}

/// The default sink: forwards diagnostics to the `log` facade.
///
/// Missing paths and unrecognized modes log at `warn`; unsupported
/// operators log at `error`, since they indicate a schema authoring
/// mistake rather than a surprising document.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::UnsupportedOperator { .. } => log::error!("{}", diagnostic),
            _ => log::warn!("{}", diagnostic),
        }
    }
}
