//! Bundled and user-defined templates.
//!
//! Two templates are compiled into the binary, one per [`GenerationKind`],
//! and are always listed under the name [`DEFAULT_NAME`]. Custom templates are
//! plain files in a user directory named `<name>_instance.template` or
//! `<name>_testbench.template`.

use crate::kind::GenerationKind;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name under which the bundled template of each kind is listed.
pub const DEFAULT_NAME: &str = "default";

const DEFAULT_INSTANCE: &str = include_str!("../templates/default_instance.template");
const DEFAULT_TESTBENCH: &str = include_str!("../templates/default_testbench.template");

/// File extension shared by every template file.
const EXTENSION: &str = ".template";

/// Returns the bundled template text for `kind`.
pub fn bundled(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Instance => DEFAULT_INSTANCE,
        GenerationKind::Testbench => DEFAULT_TESTBENCH,
    }
}

/// Errors raised by [`TemplateStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Reading or writing a template file failed.
    #[error("failed to access template {}: {source}", path.display())]
    Io {
        /// The template file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The name contains characters other than letters, digits, `_` and `-`.
    #[error("invalid template name '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidName(String),

    /// A custom template with this name already exists.
    #[error("{kind} template '{name}' already exists")]
    AlreadyExists {
        /// Kind of the template.
        kind: GenerationKind,
        /// Name of the template.
        name: String,
    },

    /// No custom template with this name exists.
    #[error("no {kind} template named '{name}'")]
    NotFound {
        /// Kind of the template.
        kind: GenerationKind,
        /// Name of the template.
        name: String,
    },

    /// Bundled templates cannot be created, overwritten or deleted.
    #[error("'default' is the bundled template and cannot be changed")]
    Bundled,
}

/// Checks that `name` is non-empty and uses only `[A-Za-z0-9_-]`.
pub fn validate_name(name: &str) -> Result<(), TemplateError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidName(name.to_string()))
    }
}

/// One entry of a template listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Template name, without kind suffix or extension.
    pub name: String,
    /// `true` for the template compiled into the binary.
    pub bundled: bool,
}

impl fmt::Display for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bundled {
            write!(f, "[Default] {}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Access to the bundled templates and a directory of custom ones.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    custom_dir: PathBuf,
}

impl TemplateStore {
    /// Creates a store over `custom_dir`. The directory is created on the
    /// first [`create`](Self::create).
    pub fn new(custom_dir: impl Into<PathBuf>) -> Self {
        Self {
            custom_dir: custom_dir.into(),
        }
    }

    /// The directory holding custom templates.
    pub fn custom_dir(&self) -> &Path {
        &self.custom_dir
    }

    /// Path of the custom template `name` of `kind`, whether or not it exists.
    pub fn path_of(&self, kind: GenerationKind, name: &str) -> PathBuf {
        self.custom_dir
            .join(format!("{name}{}{EXTENSION}", kind.suffix()))
    }

    /// Lists the bundled template followed by the custom ones, sorted by name.
    ///
    /// A missing custom directory lists only the bundled template. Files whose
    /// stem is not a valid template name are ignored.
    pub fn list(&self, kind: GenerationKind) -> Result<Vec<TemplateEntry>, TemplateError> {
        let mut entries = vec![TemplateEntry {
            name: DEFAULT_NAME.to_string(),
            bundled: true,
        }];

        let dir = match fs::read_dir(&self.custom_dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(entries),
            Err(source) => return Err(io_error(&self.custom_dir, source)),
        };

        let ending = format!("{}{EXTENSION}", kind.suffix());
        let mut custom = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|source| io_error(&self.custom_dir, source))?;
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(ending.as_str()))
            else {
                continue;
            };
            if validate_name(name).is_ok() {
                custom.push(name.to_string());
            }
        }
        custom.sort();

        entries.extend(custom.into_iter().map(|name| TemplateEntry {
            name,
            bundled: false,
        }));
        Ok(entries)
    }

    /// Loads the template to generate with.
    ///
    /// `None` or [`DEFAULT_NAME`] selects the bundled template. A selected
    /// custom template that does not exist falls back to the bundled one with
    /// a warning.
    pub fn load(
        &self,
        kind: GenerationKind,
        selected: Option<&str>,
    ) -> Result<String, TemplateError> {
        let Some(name) = selected.filter(|n| *n != DEFAULT_NAME) else {
            return Ok(bundled(kind).to_string());
        };
        validate_name(name)?;
        let path = self.path_of(kind, name);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(template = name, %kind, path = %path.display(), "loaded custom template");
                Ok(text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    template = name,
                    %kind,
                    "selected template not found, using the bundled default"
                );
                Ok(bundled(kind).to_string())
            }
            Err(source) => Err(io_error(&path, source)),
        }
    }

    /// Reads the template `name` exactly, without falling back.
    pub fn read(&self, kind: GenerationKind, name: &str) -> Result<String, TemplateError> {
        if name == DEFAULT_NAME {
            return Ok(bundled(kind).to_string());
        }
        validate_name(name)?;
        let path = self.path_of(kind, name);
        fs::read_to_string(&path).map_err(|source| not_found_or_io(kind, name, &path, source))
    }

    /// Creates a custom template seeded with the bundled one and returns its path.
    pub fn create(&self, kind: GenerationKind, name: &str) -> Result<PathBuf, TemplateError> {
        if name == DEFAULT_NAME {
            return Err(TemplateError::Bundled);
        }
        validate_name(name)?;
        fs::create_dir_all(&self.custom_dir)
            .map_err(|source| io_error(&self.custom_dir, source))?;

        let path = self.path_of(kind, name);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(TemplateError::AlreadyExists {
                    kind,
                    name: name.to_string(),
                });
            }
            Err(source) => return Err(io_error(&path, source)),
        };
        file.write_all(bundled(kind).as_bytes())
            .map_err(|source| io_error(&path, source))?;
        debug!(template = name, %kind, path = %path.display(), "created template");
        Ok(path)
    }

    /// Deletes a custom template. The bundled template cannot be deleted.
    pub fn delete(&self, kind: GenerationKind, name: &str) -> Result<(), TemplateError> {
        if name == DEFAULT_NAME {
            return Err(TemplateError::Bundled);
        }
        validate_name(name)?;
        let path = self.path_of(kind, name);
        fs::remove_file(&path).map_err(|source| not_found_or_io(kind, name, &path, source))?;
        debug!(template = name, %kind, "deleted template");
        Ok(())
    }
}

fn io_error(path: &Path, source: io::Error) -> TemplateError {
    TemplateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn not_found_or_io(
    kind: GenerationKind,
    name: &str,
    path: &Path,
    source: io::Error,
) -> TemplateError {
    if source.kind() == io::ErrorKind::NotFound {
        TemplateError::NotFound {
            kind,
            name: name.to_string(),
        }
    } else {
        io_error(path, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, TemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("templates"));
        (dir, store)
    }

    #[test]
    fn bundled_templates_use_placeholders() {
        assert!(bundled(GenerationKind::Instance).contains("${PORT_CONNECTION}"));
        let tb = bundled(GenerationKind::Testbench);
        assert!(tb.contains("module tb_${MODULE_NAME};"));
        assert!(tb.contains("${INPUT_DECLARATION}"));
        assert!(tb.trim_end().ends_with("endmodule"));
    }

    #[test]
    fn validate_names() {
        assert!(validate_name("my-tb_2").is_ok());
        assert!(matches!(validate_name(""), Err(TemplateError::InvalidName(_))));
        assert!(validate_name("../evil").is_err());
        assert!(validate_name("has space").is_err());
    }

    #[test]
    fn path_uses_kind_suffix() {
        let store = TemplateStore::new("/t");
        assert_eq!(
            store.path_of(GenerationKind::Testbench, "fast"),
            Path::new("/t/fast_testbench.template")
        );
    }

    #[test]
    fn list_without_directory_has_only_default() {
        let (_dir, store) = store();
        let entries = store.list(GenerationKind::Instance).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to_string(), "[Default] default");
    }

    #[test]
    fn list_filters_by_kind_and_sorts() {
        let (_dir, store) = store();
        store.create(GenerationKind::Instance, "zeta").unwrap();
        store.create(GenerationKind::Instance, "alpha").unwrap();
        store.create(GenerationKind::Testbench, "beta").unwrap();
        fs::write(store.custom_dir().join("notes.txt"), "x").unwrap();

        let names: Vec<String> = store
            .list(GenerationKind::Instance)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["[Default] default", "alpha", "zeta"]);
    }

    #[test]
    fn create_seeds_with_bundled_content() {
        let (_dir, store) = store();
        let path = store.create(GenerationKind::Testbench, "mine").unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            bundled(GenerationKind::Testbench)
        );
    }

    #[test]
    fn create_twice_fails() {
        let (_dir, store) = store();
        store.create(GenerationKind::Instance, "mine").unwrap();
        let err = store.create(GenerationKind::Instance, "mine").unwrap_err();
        assert!(matches!(err, TemplateError::AlreadyExists { .. }));
    }

    #[test]
    fn create_rejects_bad_and_reserved_names() {
        let (_dir, store) = store();
        assert!(matches!(
            store.create(GenerationKind::Instance, "a/b"),
            Err(TemplateError::InvalidName(_))
        ));
        assert!(matches!(
            store.create(GenerationKind::Instance, DEFAULT_NAME),
            Err(TemplateError::Bundled)
        ));
    }

    #[test]
    fn load_selected_custom_template() {
        let (_dir, store) = store();
        let path = store.create(GenerationKind::Instance, "short").unwrap();
        fs::write(&path, "${MODULE_NAME} u0 ();").unwrap();
        assert_eq!(
            store.load(GenerationKind::Instance, Some("short")).unwrap(),
            "${MODULE_NAME} u0 ();"
        );
    }

    #[test]
    fn load_falls_back_to_bundled() {
        let (_dir, store) = store();
        let kind = GenerationKind::Testbench;
        assert_eq!(store.load(kind, None).unwrap(), bundled(kind));
        assert_eq!(store.load(kind, Some(DEFAULT_NAME)).unwrap(), bundled(kind));
        assert_eq!(store.load(kind, Some("missing")).unwrap(), bundled(kind));
    }

    #[test]
    fn read_does_not_fall_back() {
        let (_dir, store) = store();
        let err = store.read(GenerationKind::Instance, "missing").unwrap_err();
        assert_eq!(err.to_string(), "no instance template named 'missing'");
        assert_eq!(
            store.read(GenerationKind::Instance, DEFAULT_NAME).unwrap(),
            bundled(GenerationKind::Instance)
        );
    }

    #[test]
    fn delete_custom_only() {
        let (_dir, store) = store();
        let path = store.create(GenerationKind::Instance, "gone").unwrap();
        store.delete(GenerationKind::Instance, "gone").unwrap();
        assert!(!path.exists());
        assert!(matches!(
            store.delete(GenerationKind::Instance, "gone"),
            Err(TemplateError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(GenerationKind::Instance, DEFAULT_NAME),
            Err(TemplateError::Bundled)
        ));
    }
}
