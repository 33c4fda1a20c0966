//! Token types for the signature lexer.
//!
//! Only the keywords that shape a module signature get their own kind. Every
//! other word (including keywords such as `always` or `assign`) is lexed as an
//! [`VerilogToken::Identifier`], which the signature scanner simply steps over.

use serde::{Deserialize, Serialize};
use vgen_source::Span;

/// A token kind.
///
/// Keywords are case-sensitive and must appear in lowercase. Literal values
/// are not stored in the token; they are sliced from the source by span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VerilogToken {
    // === Structure keywords ===
    /// `module`
    Module,
    /// `endmodule`
    Endmodule,
    /// `parameter`
    Parameter,
    /// `localparam`
    Localparam,
    /// `task`
    Task,
    /// `endtask`
    Endtask,
    /// `function`
    Function,
    /// `endfunction`
    Endfunction,

    // === Port directions ===
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,

    // === Net and variable types ===
    /// `wire`
    Wire,
    /// `reg`
    Reg,
    /// `logic`
    Logic,
    /// `tri`
    Tri,
    /// `wand`
    Wand,
    /// `wor`
    Wor,
    /// `supply0`
    Supply0,
    /// `supply1`
    Supply1,
    /// `integer`
    Integer,
    /// `real`
    Real,
    /// `time`
    Time,
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,

    // === Literals ===
    /// Any numeric literal (`42`, `8'hFF`, `'b0`, `1.5e3`)
    Number,
    /// String literal (`"hello"`)
    StringLiteral,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `=` (assignment only; `==` and friends are [`VerilogToken::Operator`])
    Equals,
    /// `#`
    Hash,
    /// Any other operator or punctuation character sequence
    Operator,

    // === Identifiers and special ===
    /// A regular identifier (`data_in`, `clk`)
    Identifier,
    /// An escaped identifier (`\bus+index `)
    EscapedIdentifier,
    /// A system identifier (`$clog2`)
    SystemIdentifier,
    /// A text macro usage (`` `WIDTH ``)
    MacroUsage,
    /// End of input
    Eof,
    /// Malformed or unrecognized input
    Error,
}

impl VerilogToken {
    /// Returns `true` if this token is a direction keyword (`input`, `output`, `inout`).
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            VerilogToken::Input | VerilogToken::Output | VerilogToken::Inout
        )
    }

    /// Returns `true` if this token is a net or variable type keyword.
    pub fn is_net_type(self) -> bool {
        matches!(
            self,
            VerilogToken::Wire
                | VerilogToken::Reg
                | VerilogToken::Logic
                | VerilogToken::Tri
                | VerilogToken::Wand
                | VerilogToken::Wor
                | VerilogToken::Supply0
                | VerilogToken::Supply1
                | VerilogToken::Integer
                | VerilogToken::Real
                | VerilogToken::Time
        )
    }

    /// Returns `true` if this token can stand before a name as a type qualifier.
    pub fn is_qualifier(self) -> bool {
        self.is_net_type() || matches!(self, VerilogToken::Signed | VerilogToken::Unsigned)
    }

    /// Returns `true` for plain and escaped identifiers.
    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            VerilogToken::Identifier | VerilogToken::EscapedIdentifier
        )
    }
}

/// A lexed token with its kind and source location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// The kind of this token.
    pub kind: VerilogToken,
    /// The source span covering this token's text.
    pub span: Span,
}

/// Looks up a keyword from an identifier string.
///
/// Returns `None` for ordinary identifiers and for keywords the signature
/// scanner does not care about.
pub fn lookup_keyword(s: &str) -> Option<VerilogToken> {
    match s {
        "module" => Some(VerilogToken::Module),
        "endmodule" => Some(VerilogToken::Endmodule),
        "parameter" => Some(VerilogToken::Parameter),
        "localparam" => Some(VerilogToken::Localparam),
        "task" => Some(VerilogToken::Task),
        "endtask" => Some(VerilogToken::Endtask),
        "function" => Some(VerilogToken::Function),
        "endfunction" => Some(VerilogToken::Endfunction),
        "input" => Some(VerilogToken::Input),
        "output" => Some(VerilogToken::Output),
        "inout" => Some(VerilogToken::Inout),
        "wire" => Some(VerilogToken::Wire),
        "reg" => Some(VerilogToken::Reg),
        "logic" => Some(VerilogToken::Logic),
        "tri" => Some(VerilogToken::Tri),
        "wand" => Some(VerilogToken::Wand),
        "wor" => Some(VerilogToken::Wor),
        "supply0" => Some(VerilogToken::Supply0),
        "supply1" => Some(VerilogToken::Supply1),
        "integer" => Some(VerilogToken::Integer),
        "real" => Some(VerilogToken::Real),
        "time" => Some(VerilogToken::Time),
        "signed" => Some(VerilogToken::Signed),
        "unsigned" => Some(VerilogToken::Unsigned),
        _ => None,
    }
}
