//! Delivery of generated text to stdout or to a file next to the source.
//!
//! File destinations are computed from the source path: the configured output
//! directory is resolved against the source file's directory, and
//! `${baseName}` in the file name pattern is replaced by the source file name
//! without its extension.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use vgen_config::OutputMode;

/// Separator between existing file content and an appended block.
const APPEND_SEPARATOR: &str = "\n\n";

/// Errors raised while writing generated text to a file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The output file could not be read, written or appended to.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Where a file destination lives, before it is resolved for a source file.
#[derive(Clone, Copy, Debug)]
pub struct FileTarget<'a> {
    /// Output directory, relative to the source file's directory.
    pub output_dir: &'a str,
    /// File name pattern; `${baseName}` is substituted.
    pub file_name: &'a str,
}

impl FileTarget<'_> {
    /// Computes the output file path for `source`.
    pub fn resolve(&self, source: &Path) -> PathBuf {
        let base_name = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
        source_dir
            .join(self.output_dir)
            .join(self.file_name.replace("${baseName}", &base_name))
    }
}

/// Delivers `text` generated from `source` according to `mode`.
///
/// Returns the written file, or `None` when the text went to `stdout`.
pub fn deliver(
    text: &str,
    source: &Path,
    mode: OutputMode,
    target: FileTarget<'_>,
    stdout: &mut impl Write,
) -> Result<Option<PathBuf>, OutputError> {
    match mode {
        OutputMode::Stdout => {
            write_stdout(stdout, text).map_err(OutputError::Stdout)?;
            Ok(None)
        }
        OutputMode::FileOverwrite | OutputMode::FileAppend => {
            let path = target.resolve(source);
            write_file(&path, text, mode == OutputMode::FileAppend)?;
            Ok(Some(path))
        }
    }
}

fn write_stdout(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Writes `text` to `path`, creating parent directories as needed.
///
/// In append mode an existing file keeps its content and `text` follows it
/// after a blank line.
pub fn write_file(path: &Path, text: &str, append: bool) -> Result<(), OutputError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if append && path.exists() {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(APPEND_SEPARATOR.as_bytes())
            .and_then(|()| file.write_all(text.as_bytes()))
            .map_err(write_err)
    } else {
        fs::write(path, text).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: FileTarget<'static> = FileTarget {
        output_dir: "./",
        file_name: "tb_${baseName}.v",
    };

    #[test]
    fn resolve_next_to_source() {
        let path = TARGET.resolve(Path::new("rtl/counter.v"));
        assert_eq!(path, Path::new("rtl/./tb_counter.v"));
    }

    #[test]
    fn resolve_relative_output_dir() {
        let target = FileTarget {
            output_dir: "../sim",
            file_name: "${baseName}_inst.v",
        };
        let path = target.resolve(Path::new("/proj/rtl/alu.sv"));
        assert_eq!(path, Path::new("/proj/rtl/../sim/alu_inst.v"));
    }

    #[test]
    fn resolve_without_placeholder() {
        let target = FileTarget {
            output_dir: "gen",
            file_name: "all.v",
        };
        assert_eq!(target.resolve(Path::new("a.v")), Path::new("gen/all.v"));
    }

    #[test]
    fn stdout_gets_trailing_newline() {
        let mut out = Vec::new();
        let written = deliver("u0 ();", Path::new("a.v"), OutputMode::Stdout, TARGET, &mut out).unwrap();
        assert!(written.is_none());
        assert_eq!(out, b"u0 ();\n");
    }

    #[test]
    fn overwrite_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("top.v");
        let target = FileTarget {
            output_dir: "out/tb",
            file_name: "tb_${baseName}.v",
        };
        let mut out = Vec::new();
        let written = deliver("first", &source, OutputMode::FileOverwrite, target, &mut out)
            .unwrap()
            .unwrap();
        deliver("second", &source, OutputMode::FileOverwrite, target, &mut out).unwrap();

        assert_eq!(written, dir.path().join("out/tb/tb_top.v"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "second");
        assert!(out.is_empty());
    }

    #[test]
    fn append_separates_with_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("top.v");
        let mut out = Vec::new();
        let path = deliver("one", &source, OutputMode::FileAppend, TARGET, &mut out)
            .unwrap()
            .unwrap();
        deliver("two", &source, OutputMode::FileAppend, TARGET, &mut out).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "one\n\ntwo");
    }

    #[test]
    fn write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = write_file(&blocker.join("out.v"), "t", false).unwrap_err();
        assert!(matches!(err, OutputError::CreateDir { .. }));
    }
}
