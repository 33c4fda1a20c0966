//! Source text bookkeeping for diagnostics.
//!
//! This crate provides [`Span`] byte ranges for locating tokens and findings in
//! a Verilog source buffer, the [`SourceFile`] wrapper that converts byte
//! offsets into line/column coordinates, and [`ResolvedSpan`] for printing
//! `path:line:col` locations.

#![warn(missing_docs)]

pub mod resolved_span;
pub mod source_file;
pub mod span;

pub use resolved_span::ResolvedSpan;
pub use source_file::SourceFile;
pub use span::Span;
