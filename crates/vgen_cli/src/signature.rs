//! `vgen signature` — print the extracted module signature.

use vgen_diagnostics::TerminalRenderer;
use vgen_verilog::{Direction, ModuleInfo};

use crate::pipeline;
use crate::{GlobalArgs, SignatureArgs, SignatureFormat};

/// Runs the `vgen signature` command.
///
/// Returns exit code 0 if a signature was extracted, 1 otherwise.
pub fn run(args: &SignatureArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let extraction = pipeline::extract_file(&args.file, &TerminalRenderer::new(global.color));
    if !global.quiet || extraction.result.is_err() {
        eprint!("{}", extraction.report);
    }

    let info = match extraction.result {
        Ok(info) => info,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(1);
        }
    };

    match args.format {
        SignatureFormat::Text => print!("{}", format_text(&info)),
        SignatureFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }
    Ok(0)
}

/// Formats a signature as an indented, human-readable listing.
fn format_text(info: &ModuleInfo) -> String {
    let mut out = format!("module {}\n", info.name);

    if !info.parameters.is_empty() {
        out.push_str("  parameters:\n");
        for p in &info.parameters {
            out.push_str(&format!("    {} = {}\n", p.name, p.value));
        }
    }

    for direction in Direction::ALL {
        let ports = info.ports(direction);
        if ports.is_empty() {
            continue;
        }
        out.push_str(&format!("  {direction}s:\n"));
        for port in ports {
            if port.is_scalar() {
                out.push_str(&format!("    {}\n", port.name));
            } else {
                out.push_str(&format!("    {} {}\n", port.range, port.name));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_verilog::{Parameter, Port};

    #[test]
    fn text_lists_non_empty_sections() {
        let mut info = ModuleInfo::new("adder");
        info.parameters.push(Parameter::new("WIDTH", "8"));
        info.inputs.push(Port::new("a", "[WIDTH-1:0]"));
        info.inputs.push(Port::new("cin", ""));
        info.outputs.push(Port::new("sum", "[WIDTH:0]"));

        assert_eq!(
            format_text(&info),
            "module adder\n  parameters:\n    WIDTH = 8\n  inputs:\n    [WIDTH-1:0] a\n    cin\n  outputs:\n    [WIDTH:0] sum\n"
        );
    }

    #[test]
    fn text_for_empty_module() {
        assert_eq!(format_text(&ModuleInfo::new("tb")), "module tb\n");
    }
}
