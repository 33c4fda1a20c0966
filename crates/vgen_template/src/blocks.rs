//! Generators for the aligned text blocks that placeholders expand to.
//!
//! Every generator returns an empty string for an empty input. Column widths
//! are computed per call and counted in characters.

use std::borrow::Cow;

use vgen_verilog::{Direction, ModuleInfo, Parameter, Port};

/// The declaration keyword used for a port's stand-in signal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum DeclKind {
    /// Driven by the testbench: declared `reg` and initialized to zero.
    Reg,
    /// Driven by the instance: declared `wire`.
    Wire,
}

impl DeclKind {
    pub(crate) fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Input => DeclKind::Reg,
            Direction::Output | Direction::Inout => DeclKind::Wire,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            DeclKind::Reg => "reg",
            DeclKind::Wire => "wire",
        }
    }

    fn initializer(self) -> &'static str {
        match self {
            DeclKind::Reg => " = 0",
            DeclKind::Wire => "",
        }
    }
}

fn width<S: AsRef<str>>(items: impl Iterator<Item = S>) -> usize {
    items.map(|s| s.as_ref().chars().count()).max().unwrap_or(0)
}

/// A name as it must appear in generated text.
///
/// An escaped identifier (`\a+b`) only ends at whitespace, so it always
/// carries a trailing space; any other name is returned unchanged.
pub(crate) fn terminated(name: &str) -> Cow<'_, str> {
    if name.starts_with('\\') && !name.ends_with(char::is_whitespace) {
        Cow::Owned(format!("{name} "))
    } else {
        Cow::Borrowed(name)
    }
}

fn terminated_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Cow<'a, str>> {
    names.map(terminated).collect()
}

/// `parameter NAME = VALUE;` per parameter, names and values left-aligned.
pub(crate) fn parameter_declaration(params: &[Parameter]) -> String {
    let names = terminated_names(params.iter().map(|p| p.name.as_str()));
    let n = width(names.iter());
    let v = width(params.iter().map(|p| p.value.as_str()));
    names
        .iter()
        .zip(params)
        .map(|(name, p)| format!("parameter {name:<n$} = {:<v$};", p.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `#(` + one `.NAME(NAME)` override per parameter + `)`.
pub(crate) fn parameter_definition(params: &[Parameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names = terminated_names(params.iter().map(|p| p.name.as_str()));
    let n = width(names.iter());
    let lines: Vec<String> = names.iter().map(|name| connection(name, n)).collect();
    format!("#(\n{}\n)", lines.join(",\n"))
}

/// One stand-in signal declaration per port: keyword, range, name.
pub(crate) fn port_declaration(ports: &[Port], kind: DeclKind) -> String {
    let r = width(ports.iter().map(|p| p.range.as_str())) + 1;
    let names = terminated_names(ports.iter().map(|p| p.name.as_str()));
    let n = width(names.iter());
    let init = kind.initializer();
    names
        .iter()
        .zip(ports)
        .map(|(name, p)| format!("{:<5}{:<r$}{name:<n$}{init};", kind.keyword(), p.range))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Named connections for every port, grouped by direction.
///
/// Groups appear in input, output, inout order separated by a blank line;
/// empty groups are left out entirely. The name column is aligned across all
/// groups.
pub(crate) fn port_connection(info: &ModuleInfo) -> String {
    let n = width(info.all_ports().map(|(_, p)| terminated(&p.name)));
    Direction::ALL
        .into_iter()
        .map(|dir| info.ports(dir))
        .filter(|ports| !ports.is_empty())
        .map(|ports| {
            ports
                .iter()
                .map(|p| connection(&terminated(&p.name), n))
                .collect::<Vec<_>>()
                .join(",\n")
        })
        .collect::<Vec<_>>()
        .join(",\n\n")
}

fn connection(name: &str, n: usize) -> String {
    format!("    .{name:<n$}({name:<n$})")
}
