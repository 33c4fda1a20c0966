//! Diagnostic codes reported by the signature extractor.

use vgen_diagnostics::{Category, DiagnosticCode};

/// `/* ...` without a closing `*/`.
pub const UNTERMINATED_COMMENT: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// `"...` without a closing quote on the same line.
pub const UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// A character that cannot start any token.
pub const UNRECOGNIZED_CHARACTER: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);

/// No `module` keyword in the input.
pub const NO_MODULE: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);
/// `module` without a following `endmodule`.
pub const MISSING_ENDMODULE: DiagnosticCode = DiagnosticCode::new(Category::Error, 202);
/// `module` not followed by an identifier.
pub const MISSING_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Error, 203);

/// An inline port default (`input clk = 1'b0`) was dropped.
pub const PORT_DEFAULT_DISCARDED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
/// A parameter without `= value` was skipped.
pub const PARAMETER_WITHOUT_VALUE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);
/// A direction keyword with no port names after it.
pub const EMPTY_PORT_CLAUSE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 303);
/// `task`/`function` without its closing keyword.
pub const UNTERMINATED_BLOCK: DiagnosticCode = DiagnosticCode::new(Category::Warning, 304);
/// The module name is an escaped identifier (`\top+x`).
pub const ESCAPED_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Warning, 305);
