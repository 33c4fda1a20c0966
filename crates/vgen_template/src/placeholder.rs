//! The `${...}` placeholder vocabulary and the substitution scan.

use crate::blocks::{self, DeclKind};
use std::fmt;
use vgen_verilog::{Direction, ModuleInfo};

/// A placeholder recognized inside a template.
///
/// The set is closed: any other `${...}` sequence is left in the output
/// untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Placeholder {
    /// `${MODULE_NAME}`: the module name.
    ModuleName,
    /// `${PARAMETER_DECLARATION}`: one `parameter NAME = VALUE;` line per parameter.
    ParameterDeclaration,
    /// `${PARAMETER_DEFINITION}`: the `#( .NAME(NAME), ... )` override list.
    ParameterDefinition,
    /// `${INPUT_DECLARATION}`: a `reg` declaration per input port.
    InputDeclaration,
    /// `${OUTPUT_DECLARATION}`: a `wire` declaration per output port.
    OutputDeclaration,
    /// `${INOUT_DECLARATION}`: a `wire` declaration per inout port.
    InoutDeclaration,
    /// `${PORT_CONNECTION}`: the named port connection list.
    PortConnection,
}

impl Placeholder {
    /// Every placeholder, in documentation order.
    pub const ALL: [Placeholder; 7] = [
        Placeholder::ModuleName,
        Placeholder::ParameterDeclaration,
        Placeholder::ParameterDefinition,
        Placeholder::InputDeclaration,
        Placeholder::OutputDeclaration,
        Placeholder::InoutDeclaration,
        Placeholder::PortConnection,
    ];

    /// The name between `${` and `}`.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::ModuleName => "MODULE_NAME",
            Placeholder::ParameterDeclaration => "PARAMETER_DECLARATION",
            Placeholder::ParameterDefinition => "PARAMETER_DEFINITION",
            Placeholder::InputDeclaration => "INPUT_DECLARATION",
            Placeholder::OutputDeclaration => "OUTPUT_DECLARATION",
            Placeholder::InoutDeclaration => "INOUT_DECLARATION",
            Placeholder::PortConnection => "PORT_CONNECTION",
        }
    }

    /// Looks up a placeholder by the name between `${` and `}`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Generates the text this placeholder stands for.
    pub fn expand(self, info: &ModuleInfo) -> String {
        match self {
            Placeholder::ModuleName => blocks::terminated(&info.name).into_owned(),
            Placeholder::ParameterDeclaration => blocks::parameter_declaration(&info.parameters),
            Placeholder::ParameterDefinition => blocks::parameter_definition(&info.parameters),
            Placeholder::InputDeclaration => declaration(info, Direction::Input),
            Placeholder::OutputDeclaration => declaration(info, Direction::Output),
            Placeholder::InoutDeclaration => declaration(info, Direction::Inout),
            Placeholder::PortConnection => blocks::port_connection(info),
        }
    }
}

fn declaration(info: &ModuleInfo, direction: Direction) -> String {
    blocks::port_declaration(info.ports(direction), DeclKind::for_direction(direction))
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}}}", self.name())
    }
}

/// Replaces every known placeholder in one left-to-right pass.
///
/// Generated text is appended to the output and never rescanned, so a module
/// or port literally named `${MODULE_NAME}` cannot trigger a second expansion.
pub(crate) fn substitute(template: &str, info: &ModuleInfo) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let known = after
            .find('}')
            .and_then(|end| Placeholder::from_name(&after[..end]).map(|p| (p, end)));
        match known {
            Some((placeholder, end)) => {
                out.push_str(&placeholder.expand(info));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_verilog::Port;

    fn info() -> ModuleInfo {
        let mut info = ModuleInfo::new("top");
        info.inputs.push(Port::new("clk", ""));
        info
    }

    #[test]
    fn names_round_trip() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_name(p.name()), Some(p));
        }
        assert_eq!(Placeholder::from_name("module_name"), None);
    }

    #[test]
    fn display_is_the_template_token() {
        assert_eq!(Placeholder::PortConnection.to_string(), "${PORT_CONNECTION}");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let out = substitute("${MODULE_NAME} u_${MODULE_NAME}", &info());
        assert_eq!(out, "top u_top");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        let out = substitute("${baseName} ${FOO} ${MODULE_NAME} ${", &info());
        assert_eq!(out, "${baseName} ${FOO} top ${");
    }

    #[test]
    fn unclosed_placeholder_before_known_one() {
        let out = substitute("${A ${MODULE_NAME}", &info());
        assert_eq!(out, "${A top");
    }

    #[test]
    fn generated_text_is_not_rescanned() {
        let info = ModuleInfo::new("${PORT_CONNECTION}");
        let out = substitute("${MODULE_NAME}", &info);
        assert_eq!(out, "${PORT_CONNECTION}");
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let out = substitute("// 模块 ${MODULE_NAME} — ok", &info());
        assert_eq!(out, "// 模块 top — ok");
    }
}
