//! `vgen template` — manage the bundled and custom templates.

use vgen_template::store::DEFAULT_NAME;
use vgen_template::GenerationKind;

use crate::pipeline;
use crate::{GlobalArgs, TemplateCommand};

/// Runs a `vgen template` subcommand.
pub fn run(command: &TemplateCommand, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let workspace = pipeline::load_workspace(global)?;
    let store = workspace.template_store();

    match command {
        TemplateCommand::List(args) => {
            let kind = GenerationKind::from(args.kind);
            let selected = workspace
                .config
                .templates
                .selected(kind)
                .unwrap_or(DEFAULT_NAME);
            for entry in store.list(kind)? {
                let marker = if entry.name == selected { "*" } else { " " };
                println!("{marker} {entry}");
            }
        }
        TemplateCommand::New(args) => {
            let path = store.create(args.kind.into(), &args.name)?;
            if !global.quiet {
                eprintln!("   Created {}", path.display());
            }
            println!("{}", path.display());
        }
        TemplateCommand::Show(args) => {
            let kind = GenerationKind::from(args.kind);
            let text = match args.name {
                Some(ref name) => store.read(kind, name)?,
                None => store.load(kind, workspace.config.templates.selected(kind))?,
            };
            print!("{text}");
        }
        TemplateCommand::Delete(args) => {
            let kind = GenerationKind::from(args.kind);
            store.delete(kind, &args.name)?;
            if !global.quiet {
                eprintln!("   Deleted {kind} template '{}'", args.name);
            }
            if workspace.config.templates.selected(kind) == Some(args.name.as_str()) {
                eprintln!(
                    "warning: '{}' is still selected in the configuration; the bundled template will be used",
                    args.name
                );
            }
        }
    }
    Ok(0)
}
