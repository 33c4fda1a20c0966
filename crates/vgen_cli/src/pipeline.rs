//! Shared helpers for CLI commands.
//!
//! Contains configuration resolution, the template store it implies, and the
//! read-extract-report step every generating command starts with.

use std::path::{Path, PathBuf};

use vgen_config::VgenConfig;
use vgen_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use vgen_source::SourceFile;
use vgen_template::TemplateStore;
use vgen_verilog::{ExtractError, ModuleInfo};

use crate::GlobalArgs;

/// The loaded configuration and the directory its relative paths refer to.
#[derive(Debug)]
pub struct Workspace {
    /// The parsed configuration, or the defaults when no file was found.
    pub config: VgenConfig,
    /// Directory of the configuration file, or the current directory.
    pub base_dir: PathBuf,
}

impl Workspace {
    /// The template store rooted at the configured custom directory.
    pub fn template_store(&self) -> TemplateStore {
        TemplateStore::new(self.config.templates.custom_dir_in(&self.base_dir))
    }
}

/// Loads the configuration named by `--config`, or the nearest `vgen.toml`
/// above the current directory, or the defaults.
pub fn load_workspace(global: &GlobalArgs) -> Result<Workspace, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let path = PathBuf::from(config_path);
        let config = vgen_config::load_config(&path)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        return Ok(Workspace {
            config,
            base_dir: parent_dir(&path),
        });
    }

    let cwd = std::env::current_dir()?;
    match vgen_config::discover_config(&cwd) {
        Some(path) => {
            let config = vgen_config::load_config(&path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            Ok(Workspace {
                config,
                base_dir: parent_dir(&path),
            })
        }
        None => Ok(Workspace {
            config: VgenConfig::default(),
            base_dir: cwd,
        }),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Errors from reading a source file and extracting its signature.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The source file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// No module signature could be extracted.
    #[error("{}: {source}", path.display())]
    Extract {
        /// The source file.
        path: PathBuf,
        /// Why extraction stopped.
        source: ExtractError,
    },
}

impl SourceError {
    /// Whether the file was read but holds no extractable module.
    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::Read { .. } => false,
            SourceError::Extract { source, .. } => source.is_not_found(),
        }
    }
}

/// The outcome of extracting one source file.
pub struct Extraction {
    /// Diagnostics rendered for the terminal, in emission order.
    pub report: String,
    /// The extracted signature.
    pub result: Result<ModuleInfo, SourceError>,
}

/// Reads `path`, extracts its first module and renders the diagnostics.
///
/// Safe to call from several threads at once; nothing is printed.
pub fn extract_file(path: &Path, renderer: &TerminalRenderer) -> Extraction {
    let source = match SourceFile::load(path) {
        Ok(source) => source,
        Err(source) => {
            return Extraction {
                report: String::new(),
                result: Err(SourceError::Read {
                    path: path.to_path_buf(),
                    source,
                }),
            }
        }
    };

    let sink = DiagnosticSink::new();
    let result = vgen_verilog::extract_with_diagnostics(&source.content, &sink).map_err(
        |source| SourceError::Extract {
            path: path.to_path_buf(),
            source,
        },
    );
    let report = sink
        .take_all()
        .iter()
        .map(|diag| renderer.render(diag, &source))
        .collect();

    Extraction { report, result }
}
