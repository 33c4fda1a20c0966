//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use vgen_source::SourceFile;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic against the source it was reported for.
    fn render(&self, diag: &Diagnostic, source: &SourceFile) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// warning[W301]: default value of port `rst` discarded
///   --> rtl/top.v:3:16
///    |
///  3 |     input rst = 1'b0,
///    |           ^^^
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        let color = match diag.severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{color}m{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source: &SourceFile) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if !diag.primary_span.is_dummy() {
            let resolved = source.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let line_num = resolved.start_line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_content = source.line_text(diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            let span_len = diag.primary_span.len().max(1) as usize;
            let carets = "^".repeat(span_len);
            let col_padding = " ".repeat((resolved.start_col as usize).saturating_sub(1));
            out.push_str(&format!("{padding} | {col_padding}{carets}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
