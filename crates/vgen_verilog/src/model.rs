//! The extracted module signature.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signature of one Verilog module: its name, parameters and ports.
///
/// Produced once per [`extract`](crate::extract) call and never mutated by the
/// renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// The module identifier.
    pub name: String,
    /// Parameters in declaration order. Duplicates are kept.
    pub parameters: Vec<Parameter>,
    /// `input` ports in declaration order.
    pub inputs: Vec<Port>,
    /// `output` ports in declaration order.
    pub outputs: Vec<Port>,
    /// `inout` ports in declaration order.
    pub inouts: Vec<Port>,
}

impl ModuleInfo {
    /// Creates a signature with the given name and no parameters or ports.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the ports of one direction.
    pub fn ports(&self, direction: Direction) -> &[Port] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
            Direction::Inout => &self.inouts,
        }
    }

    pub(crate) fn ports_mut(&mut self, direction: Direction) -> &mut Vec<Port> {
        match direction {
            Direction::Input => &mut self.inputs,
            Direction::Output => &mut self.outputs,
            Direction::Inout => &mut self.inouts,
        }
    }

    /// Iterates over all ports: inputs, then outputs, then inouts.
    pub fn all_ports(&self) -> impl Iterator<Item = (Direction, &Port)> {
        Direction::ALL
            .into_iter()
            .flat_map(move |dir| self.ports(dir).iter().map(move |p| (dir, p)))
    }

    /// Returns the total number of ports across all directions.
    pub fn port_count(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.inouts.len()
    }
}

/// A module parameter with its unevaluated default expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter identifier.
    pub name: String,
    /// The raw expression text, e.g. `8` or `DATA_WIDTH*2`.
    pub value: String,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A module port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The port identifier.
    pub name: String,
    /// The raw range text including brackets (`[7:0]`), or empty for scalars.
    pub range: String,
}

impl Port {
    /// Creates a port.
    pub fn new(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
        }
    }

    /// Returns `true` if the port has no range.
    pub fn is_scalar(&self) -> bool {
        self.range.is_empty()
    }
}

/// A port direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

impl Direction {
    /// All directions in rendering order.
    pub const ALL: [Direction; 3] = [Direction::Input, Direction::Output, Direction::Inout];

    /// Returns the Verilog keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
