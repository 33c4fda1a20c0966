//! Configuration types deserialized from `vgen.toml`.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use vgen_template::GenerationKind;

/// The top-level configuration parsed from `vgen.toml`.
///
/// Every section is optional; an empty file is the default configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VgenConfig {
    /// Template selection and the custom template directory.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Delivery of generated instances.
    #[serde(default)]
    pub instance: OutputConfig,
    /// Delivery of generated testbenches.
    #[serde(default)]
    pub testbench: OutputConfig,
}

impl VgenConfig {
    /// The delivery settings for `kind`.
    pub fn output(&self, kind: GenerationKind) -> &OutputConfig {
        match kind {
            GenerationKind::Instance => &self.instance,
            GenerationKind::Testbench => &self.testbench,
        }
    }

    /// The output file name pattern for `kind`, falling back to its default.
    pub fn file_name(&self, kind: GenerationKind) -> &str {
        self.output(kind)
            .file_name
            .as_deref()
            .unwrap_or_else(|| default_file_name(kind))
    }
}

/// The file name pattern used when a section does not set `file_name`.
///
/// `${baseName}` stands for the source file name without its extension.
pub fn default_file_name(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Instance => "${baseName}_inst.v",
        GenerationKind::Testbench => "tb_${baseName}.v",
    }
}

/// The `[templates]` section.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory of custom templates, relative to the configuration file.
    pub custom_dir: String,
    /// Template used for instances; the bundled one when unset.
    pub instance: Option<String>,
    /// Template used for testbenches; the bundled one when unset.
    pub testbench: Option<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            custom_dir: ".vgen/templates".to_string(),
            instance: None,
            testbench: None,
        }
    }
}

impl TemplatesConfig {
    /// The selected template name for `kind`, if any.
    pub fn selected(&self, kind: GenerationKind) -> Option<&str> {
        match kind {
            GenerationKind::Instance => self.instance.as_deref(),
            GenerationKind::Testbench => self.testbench.as_deref(),
        }
    }

    /// Resolves [`custom_dir`](Self::custom_dir) against `base`, the
    /// directory holding the configuration file.
    pub fn custom_dir_in(&self, base: &Path) -> PathBuf {
        base.join(&self.custom_dir)
    }
}

/// The `[instance]` and `[testbench]` sections.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Where generated text goes.
    pub output: OutputMode,
    /// Output directory, relative to the directory of the source file.
    pub output_dir: String,
    /// File name pattern; see [`default_file_name`].
    pub file_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::default(),
            output_dir: "./".to_string(),
            file_name: None,
        }
    }
}

/// Where generated text is delivered.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Print to standard output (default).
    #[default]
    Stdout,
    /// Write the output file, replacing any existing content.
    FileOverwrite,
    /// Append to the output file after a blank line.
    FileAppend,
}

impl OutputMode {
    /// The name used in `vgen.toml` and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Stdout => "stdout",
            OutputMode::FileOverwrite => "file-overwrite",
            OutputMode::FileAppend => "file-append",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(OutputMode::Stdout),
            "file-overwrite" => Ok(OutputMode::FileOverwrite),
            "file-append" => Ok(OutputMode::FileAppend),
            other => Err(ConfigError::UnknownOutputMode(other.to_string())),
        }
    }
}
