//! Template rendering for module instances and testbenches.
//!
//! [`render`] fills a plain-text template with blocks generated from a
//! [`ModuleInfo`]. The placeholders it understands are listed in
//! [`Placeholder`]; everything else in the template is copied through as is.
//!
//! The [`store`] module manages the bundled default templates and a directory
//! of user-defined ones.

#![warn(missing_docs)]

mod blocks;
mod kind;
mod placeholder;
pub mod store;

pub use kind::GenerationKind;
pub use placeholder::Placeholder;
pub use store::{TemplateEntry, TemplateError, TemplateStore};

use vgen_verilog::ModuleInfo;

/// Renders `template` for the module described by `info`.
///
/// Every known placeholder is replaced by its generated block in a single
/// pass, then runs of more than one blank line are collapsed to one. Rendering
/// never fails; a template without placeholders or blank-line runs comes back
/// unchanged.
pub fn render(template: &str, info: &ModuleInfo) -> String {
    collapse_blank_lines(&placeholder::substitute(template, info))
}

/// Collapses every whitespace run containing three or more newlines so that it
/// holds exactly one blank line.
///
/// The part of the run from its first to its last newline becomes `"\n\n"`;
/// whitespace before the first and after the last newline is kept, so the
/// indentation of the following line survives.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(char::is_whitespace) {
        out.push_str(&rest[..start]);
        let run = &rest[start..];
        let len = run
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(run.len());
        let (ws, tail) = run.split_at(len);
        push_whitespace_run(&mut out, ws);
        rest = tail;
    }
    out.push_str(rest);
    out
}

fn push_whitespace_run(out: &mut String, ws: &str) {
    match (ws.find('\n'), ws.rfind('\n')) {
        (Some(first), Some(last)) if ws.matches('\n').count() >= 3 => {
            out.push_str(&ws[..first]);
            out.push_str("\n\n");
            out.push_str(&ws[last + 1..]);
        }
        _ => out.push_str(ws),
    }
}
