//! Conformance test helpers for vgen.
//!
//! Provides shared functions that run Verilog source text through extraction
//! and template rendering and return structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use vgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use vgen_template::{store, GenerationKind};
use vgen_verilog::{ExtractError, ModuleInfo};

/// Result of extracting a module signature with diagnostics collected.
pub struct ExtractionResult {
    /// The extracted signature, or why extraction stopped.
    pub result: Result<ModuleInfo, ExtractError>,
    /// All diagnostics emitted during extraction.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl ExtractionResult {
    /// The extracted signature; panics with the diagnostics if extraction failed.
    pub fn info(&self) -> &ModuleInfo {
        match &self.result {
            Ok(info) => info,
            Err(e) => panic!("extraction failed: {e}; diagnostics: {:?}", self.diagnostics),
        }
    }

    /// Whether any diagnostic carries `code`.
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

/// Extracts the first module of `source`, collecting diagnostics.
pub fn extract(source: &str) -> ExtractionResult {
    let sink = DiagnosticSink::new();
    let result = vgen_verilog::extract_with_diagnostics(source, &sink);
    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    ExtractionResult {
        result,
        diagnostics,
        error_count,
        warning_count,
    }
}

/// Extracts `source` and renders it with the bundled template for `kind`.
pub fn generate(source: &str, kind: GenerationKind) -> Result<String, ExtractError> {
    let info = vgen_verilog::extract(source)?;
    Ok(vgen_template::render(store::bundled(kind), &info))
}

/// Extracts `source` and renders it with `template`.
pub fn generate_with(source: &str, template: &str) -> Result<String, ExtractError> {
    let info = vgen_verilog::extract(source)?;
    Ok(vgen_template::render(template, &info))
}
