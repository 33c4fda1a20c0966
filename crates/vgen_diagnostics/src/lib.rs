//! Diagnostic creation, severity management, and terminal rendering.
//!
//! Signature extraction is lenient: it keeps going past malformed clauses and
//! reports what it skipped as [`Diagnostic`]s. The thread-safe
//! [`DiagnosticSink`] accumulates them during a call, and the
//! [`TerminalRenderer`] formats them for the command line.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
