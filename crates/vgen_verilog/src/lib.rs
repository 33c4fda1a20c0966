//! Verilog module-signature extraction.
//!
//! The main entry point is [`extract`], which takes Verilog source text and
//! returns the [`ModuleInfo`] of the first module in it: name, parameters,
//! and ports grouped by direction.
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): converts source text to tokens, dropping comments
//!   and compiler directives.
//! - **Noise blocks**: `task`/`function` bodies are removed from the token
//!   stream so their local declarations never look like ports.
//! - **Signature scan**: a small recursive-descent pass over the module body
//!   collecting `parameter` and `input`/`output`/`inout` clauses.
//!
//! Anything the scan skips or drops is reported through
//! [`extract_with_diagnostics`].

#![warn(missing_docs)]

pub mod codes;
mod error;
/// Lexical analyzer for Verilog source text.
pub mod lexer;
mod model;
mod signature;
/// Token types for the signature lexer.
pub mod token;

pub use error::ExtractError;
pub use model::{Direction, ModuleInfo, Parameter, Port};
pub use token::{Token, VerilogToken};

use vgen_diagnostics::DiagnosticSink;

/// Extracts the signature of the first module in `source`.
///
/// Fails only when no `module ... endmodule` pair or no module name can be
/// found. A module without parameters or ports is a valid result.
pub fn extract(source: &str) -> Result<ModuleInfo, ExtractError> {
    extract_with_diagnostics(source, &DiagnosticSink::new())
}

/// Like [`extract`], additionally reporting lexer errors and skipped or
/// discarded declarations to `sink`.
pub fn extract_with_diagnostics(
    source: &str,
    sink: &DiagnosticSink,
) -> Result<ModuleInfo, ExtractError> {
    let tokens = lexer::lex(source, sink);
    let tokens = signature::strip_noise_blocks(tokens, sink);
    let (body, end) = signature::locate_module(&tokens, sink)?;
    signature::SignatureScanner::new(tokens, body, end, source, sink).scan()
}
