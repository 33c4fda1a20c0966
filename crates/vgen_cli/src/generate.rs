//! `vgen instance` and `vgen testbench` — render a template per source file.
//!
//! Source files are read, extracted and rendered in parallel. Diagnostics and
//! results are then reported and delivered one file at a time, in the order
//! the files were given, so stdout output and appended files stay
//! deterministic.

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};
use vgen_diagnostics::TerminalRenderer;
use vgen_template::GenerationKind;

use crate::output::{self, FileTarget};
use crate::pipeline::{self, SourceError};
use crate::{GenerateArgs, GlobalArgs};

/// Text rendered for one source file, ready for delivery.
struct Rendered {
    path: PathBuf,
    report: String,
    result: Result<String, SourceError>,
}

/// Runs `vgen instance` or `vgen testbench`.
///
/// Returns exit code 0 if every file was generated and delivered, 1 otherwise.
pub fn run(
    kind: GenerationKind,
    args: &GenerateArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let workspace = pipeline::load_workspace(global)?;

    let template = match args.template {
        Some(ref path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read template {}: {e}", path.display()))?,
        None => workspace
            .template_store()
            .load(kind, workspace.config.templates.selected(kind))?,
    };

    let settings = workspace.config.output(kind);
    let mode = args.output.unwrap_or(settings.output);
    let target = FileTarget {
        output_dir: &settings.output_dir,
        file_name: workspace.config.file_name(kind),
    };
    debug!(%kind, %mode, files = args.files.len(), "generating");

    let renderer = TerminalRenderer::new(global.color);
    let rendered: Vec<Rendered> = args
        .files
        .par_iter()
        .map(|path| render_file(path, &template, &renderer))
        .collect();

    let mut stdout = io::stdout().lock();
    let mut failures = 0usize;
    let mut without_module = 0usize;
    for item in rendered {
        if !global.quiet || item.result.is_err() {
            eprint!("{}", item.report);
        }
        let text = match item.result {
            Ok(text) => text,
            Err(e) => {
                eprintln!("error: {e}");
                if e.is_not_found() {
                    without_module += 1;
                }
                failures += 1;
                continue;
            }
        };
        match output::deliver(&text, &item.path, mode, target, &mut stdout) {
            Ok(Some(written)) => {
                info!(source = %item.path.display(), output = %written.display(), "written");
                if !global.quiet {
                    eprintln!("   Generated {kind} -> {}", written.display());
                }
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("error: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        if !global.quiet {
            eprintln!("{}", summary(failures, without_module, args.files.len()));
        }
        Ok(1)
    } else {
        Ok(0)
    }
}

/// The closing status line for a run with failures.
fn summary(failures: usize, without_module: usize, total: usize) -> String {
    let mut line = format!("   Result: {failures} of {total} file(s) failed");
    if without_module > 0 {
        line.push_str(&format!(", {without_module} without a module"));
    }
    line
}

fn render_file(path: &Path, template: &str, renderer: &TerminalRenderer) -> Rendered {
    let extraction = pipeline::extract_file(path, renderer);
    Rendered {
        path: path.to_path_buf(),
        report: extraction.report,
        result: extraction
            .result
            .map(|info| vgen_template::render(template, &info)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_file_uses_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inv.v");
        std::fs::write(&path, "module inv(input a, output y); assign y = ~a; endmodule").unwrap();

        let rendered = render_file(&path, "${MODULE_NAME} u0 (\n${PORT_CONNECTION}\n);", &TerminalRenderer::new(false));
        assert_eq!(rendered.result.unwrap(), "inv u0 (\n    .a(a),\n\n    .y(y)\n);");
        assert!(rendered.report.is_empty());
    }

    #[test]
    fn summary_counts_files_without_a_module() {
        assert_eq!(summary(1, 0, 3), "   Result: 1 of 3 file(s) failed");
        assert_eq!(
            summary(2, 1, 2),
            "   Result: 2 of 2 file(s) failed, 1 without a module"
        );
    }

    #[test]
    fn render_file_propagates_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.v");
        std::fs::write(&path, "module bad(input a);").unwrap();

        let rendered = render_file(&path, "${MODULE_NAME}", &TerminalRenderer::new(false));
        let err = rendered.result.unwrap_err();
        assert!(err.is_not_found());
        assert!(rendered.report.contains("error[E202]"));
    }
}
