//! vgen — generate Verilog instances and testbenches from module sources.
//!
//! Provides `vgen instance` and `vgen testbench` for rendering templates from
//! the first module of each source file, `vgen signature` for inspecting what
//! was extracted, and `vgen template` for managing custom templates.

#![warn(missing_docs)]

mod generate;
mod output;
mod pipeline;
mod signature;
mod template;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vgen_config::OutputMode;
use vgen_template::GenerationKind;

/// vgen — Verilog instance and testbench generator.
#[derive(Parser, Debug)]
#[command(name = "vgen", version, about = "Verilog instance and testbench generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `vgen.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an instantiation of the first module in each file.
    Instance(GenerateArgs),
    /// Generate a testbench for the first module in each file.
    Testbench(GenerateArgs),
    /// Print the signature extracted from a source file.
    Signature(SignatureArgs),
    /// Manage instance and testbench templates.
    #[command(subcommand)]
    Template(TemplateCommand),
}

/// Arguments for `vgen instance` and `vgen testbench`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Verilog source files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Render this template file instead of the configured one.
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Where to deliver the result: stdout, file-overwrite or file-append.
    #[arg(short, long)]
    pub output: Option<OutputMode>,
}

/// Arguments for the `vgen signature` subcommand.
#[derive(Parser, Debug)]
pub struct SignatureArgs {
    /// Verilog source file.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = SignatureFormat::Text)]
    pub format: SignatureFormat,
}

/// `vgen template` subcommands.
#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List the bundled and custom templates of a kind.
    List(TemplateKindArgs),
    /// Create a custom template seeded with the bundled one.
    New(TemplateNameArgs),
    /// Print a template; the selected one when no name is given.
    Show(TemplateShowArgs),
    /// Delete a custom template.
    Delete(TemplateNameArgs),
}

/// Selects the template kind.
#[derive(Parser, Debug)]
pub struct TemplateKindArgs {
    /// Template kind.
    #[arg(short, long, value_enum)]
    pub kind: KindArg,
}

/// Names one template of a kind.
#[derive(Parser, Debug)]
pub struct TemplateNameArgs {
    /// Template kind.
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Template name (letters, digits, `_` and `-`).
    pub name: String,
}

/// Optionally names one template of a kind.
#[derive(Parser, Debug)]
pub struct TemplateShowArgs {
    /// Template kind.
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Template name; `default` is the bundled template.
    pub name: Option<String>,
}

/// Template kind on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Module instantiation.
    Instance,
    /// Testbench module.
    Testbench,
}

impl From<KindArg> for GenerationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Instance => GenerationKind::Instance,
            KindArg::Testbench => GenerationKind::Testbench,
        }
    }
}

/// Signature output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SignatureFormat {
    /// Human-readable listing.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Instance(ref args) => generate::run(GenerationKind::Instance, args, &global),
        Command::Testbench(ref args) => generate::run(GenerationKind::Testbench, args, &global),
        Command::Signature(ref args) => signature::run(args, &global),
        Command::Template(ref command) => template::run(command, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The log level used when `RUST_LOG` is not set.
fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over the
/// `--verbose` and `--quiet` flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            color: false,
            config: None,
        }
    }

    #[test]
    fn parse_instance_files() {
        let cli = Cli::parse_from(["vgen", "instance", "rtl/a.v", "rtl/b.v"]);
        match cli.command {
            Command::Instance(ref args) => {
                assert_eq!(args.files, vec![PathBuf::from("rtl/a.v"), PathBuf::from("rtl/b.v")]);
                assert!(args.template.is_none());
                assert!(args.output.is_none());
            }
            _ => panic!("expected Instance command"),
        }
    }

    #[test]
    fn parse_testbench_with_options() {
        let cli = Cli::parse_from([
            "vgen",
            "testbench",
            "top.v",
            "--template",
            "my.template",
            "--output",
            "file-append",
        ]);
        match cli.command {
            Command::Testbench(ref args) => {
                assert_eq!(args.template, Some(PathBuf::from("my.template")));
                assert_eq!(args.output, Some(OutputMode::FileAppend));
            }
            _ => panic!("expected Testbench command"),
        }
    }

    #[test]
    fn generate_requires_files() {
        assert!(Cli::try_parse_from(["vgen", "instance"]).is_err());
    }

    #[test]
    fn unknown_output_mode_is_rejected() {
        assert!(Cli::try_parse_from(["vgen", "instance", "a.v", "-o", "clipboard"]).is_err());
    }

    #[test]
    fn parse_signature_json() {
        let cli = Cli::parse_from(["vgen", "signature", "top.v", "--format", "json"]);
        match cli.command {
            Command::Signature(ref args) => {
                assert_eq!(args.file, PathBuf::from("top.v"));
                assert_eq!(args.format, SignatureFormat::Json);
            }
            _ => panic!("expected Signature command"),
        }
    }

    #[test]
    fn parse_signature_default_format() {
        let cli = Cli::parse_from(["vgen", "signature", "top.v"]);
        match cli.command {
            Command::Signature(ref args) => assert_eq!(args.format, SignatureFormat::Text),
            _ => panic!("expected Signature command"),
        }
    }

    #[test]
    fn parse_template_new() {
        let cli = Cli::parse_from(["vgen", "template", "new", "--kind", "testbench", "fast"]);
        match cli.command {
            Command::Template(TemplateCommand::New(ref args)) => {
                assert_eq!(args.kind, KindArg::Testbench);
                assert_eq!(args.name, "fast");
            }
            _ => panic!("expected Template New command"),
        }
    }

    #[test]
    fn parse_template_show_without_name() {
        let cli = Cli::parse_from(["vgen", "template", "show", "-k", "instance"]);
        match cli.command {
            Command::Template(TemplateCommand::Show(ref args)) => {
                assert_eq!(args.kind, KindArg::Instance);
                assert!(args.name.is_none());
            }
            _ => panic!("expected Template Show command"),
        }
    }

    #[test]
    fn template_kind_is_required() {
        assert!(Cli::try_parse_from(["vgen", "template", "list"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["vgen", "--quiet", "--color", "never", "signature", "a.v"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_path_after_subcommand() {
        let cli = Cli::parse_from(["vgen", "instance", "a.v", "--config", "/p/vgen.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/p/vgen.toml"));
    }

    #[test]
    fn kind_arg_maps_to_generation_kind() {
        assert_eq!(GenerationKind::from(KindArg::Instance), GenerationKind::Instance);
        assert_eq!(GenerationKind::from(KindArg::Testbench), GenerationKind::Testbench);
    }

    #[test]
    fn log_level_follows_flags() {
        assert_eq!(default_log_level(&global(false, false)), "warn");
        assert_eq!(default_log_level(&global(true, false)), "error");
        assert_eq!(default_log_level(&global(false, true)), "debug");
    }
}
