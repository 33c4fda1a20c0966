//! Lexical analyzer for Verilog source text.
//!
//! Converts source text into a sequence of [`Token`]s. Line and block comments
//! and compiler directives (`` `timescale ``, `` `define ``, ...) are skipped
//! as whitespace. String literals are lexed as single tokens, so comment
//! markers inside them are never mistaken for comments. Errors are reported to
//! the [`DiagnosticSink`] and produce [`VerilogToken::Error`] tokens.

use crate::codes;
use crate::token::{lookup_keyword, Token, VerilogToken};
use vgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use vgen_source::Span;

/// Lexes the given source text into a vector of tokens.
///
/// The returned vector always ends with a [`VerilogToken::Eof`] token.
pub fn lex(source: &str, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_end() {
                tokens.push(Token {
                    kind: VerilogToken::Eof,
                    span: Span::new(self.pos as u32, self.pos as u32),
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    fn token(&self, kind: VerilogToken, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn error(&self, code: DiagnosticCode, msg: impl Into<String>, span: Span) {
        self.sink.emit(Diagnostic::error(code, msg, span));
    }

    fn skip_to_line_end(&mut self) {
        while !self.at_end() && self.peek() != b'\n' {
            self.pos += 1;
        }
    }

    /// Skips whitespace, comments and compiler directives.
    fn skip_trivia(&mut self) {
        loop {
            while !self.at_end() && self.peek().is_ascii_whitespace() {
                self.pos += 1;
            }
            match (self.peek(), self.peek_at(1)) {
                (b'/', b'/') => self.skip_to_line_end(),
                (b'/', b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.at_end() {
                            self.error(
                                codes::UNTERMINATED_COMMENT,
                                "unterminated block comment",
                                self.span_from(start),
                            );
                            break;
                        }
                        if self.peek() == b'*' && self.peek_at(1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (b'`', _) => match directive_extent(self.directive_name()) {
                    Some(extent) => self.skip_directive(extent),
                    None => return,
                },
                _ => return,
            }
        }
    }

    /// The identifier following the backtick at the current position.
    fn directive_name(&self) -> &[u8] {
        let rest = &self.source[(self.pos + 1).min(self.source.len())..];
        let len = rest.iter().take_while(|b| is_ident_char(**b)).count();
        &rest[..len]
    }

    fn skip_directive(&mut self, extent: DirectiveExtent) {
        let len = self.directive_name().len();
        self.pos += 1 + len;
        match extent {
            DirectiveExtent::Word => {}
            DirectiveExtent::WordAndName => {
                self.eat_while(|c| c == b' ' || c == b'\t');
                self.eat_while(is_ident_char);
            }
            // `define bodies may continue over several lines
            DirectiveExtent::Line => loop {
                self.skip_to_line_end();
                let line = self.source[..self.pos].trim_ascii_end();
                if line.ends_with(b"\\") && !self.at_end() {
                    self.pos += 1;
                    continue;
                }
                break;
            },
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            return self.lex_identifier_or_keyword(start);
        }
        if b == b'\\' {
            return self.lex_escaped_identifier(start);
        }
        if b == b'$' {
            return self.lex_system_identifier(start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'\'' && is_base_char(self.peek_at(1)) {
            self.pos += 1;
            self.eat_based_value();
            return self.token(VerilogToken::Number, start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        if b == b'`' {
            self.pos += 1;
            self.eat_while(is_ident_char);
            return self.token(VerilogToken::MacroUsage, start);
        }
        self.lex_punctuation(start)
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Token {
        while !self.at_end() && is_ident_char(self.peek()) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let kind = lookup_keyword(text).unwrap_or(VerilogToken::Identifier);
        self.token(kind, start)
    }

    fn lex_escaped_identifier(&mut self, start: usize) -> Token {
        self.pos += 1; // backslash
        while !self.at_end() && !self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            self.error(
                codes::UNRECOGNIZED_CHARACTER,
                "empty escaped identifier",
                self.span_from(start),
            );
            return self.token(VerilogToken::Error, start);
        }
        self.token(VerilogToken::EscapedIdentifier, start)
    }

    fn lex_system_identifier(&mut self, start: usize) -> Token {
        self.pos += 1; // $
        while !self.at_end() && is_ident_char(self.peek()) {
            self.pos += 1;
        }
        self.token(VerilogToken::SystemIdentifier, start)
    }

    /// Lexes decimal, sized/based (`8'hFF`, `4'sb1010`) and real literals.
    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_while(|c| c.is_ascii_digit() || c == b'_');

        // sized literal, optionally with whitespace before the tick: `8 'hFF`
        let mut look = self.pos;
        while self.source.get(look).is_some_and(|c| *c == b' ' || *c == b'\t') {
            look += 1;
        }
        if self.source.get(look) == Some(&b'\'')
            && is_base_char(self.source.get(look + 1).copied().unwrap_or(0))
        {
            self.pos = look + 1;
            self.eat_based_value();
            return self.token(VerilogToken::Number, start);
        }

        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit() || c == b'_');
        }
        if matches!(self.peek(), b'e' | b'E') {
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            self.eat_while(|c| c.is_ascii_digit() || c == b'_');
        }
        self.token(VerilogToken::Number, start)
    }

    /// Consumes `[s]<base><digits>` after the tick of a based literal.
    fn eat_based_value(&mut self) {
        if matches!(self.peek(), b's' | b'S') {
            self.pos += 1;
        }
        if !is_radix_char(self.peek()) {
            return;
        }
        self.pos += 1;
        while matches!(self.peek(), b' ' | b'\t') {
            self.pos += 1;
        }
        self.eat_while(|c| c.is_ascii_hexdigit() || matches!(c, b'x' | b'X' | b'z' | b'Z' | b'?' | b'_'));
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.at_end() && pred(self.peek()) {
            self.pos += 1;
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1; // opening quote
        loop {
            if self.at_end() || self.peek() == b'\n' {
                self.error(
                    codes::UNTERMINATED_STRING,
                    "unterminated string literal",
                    self.span_from(start),
                );
                return self.token(VerilogToken::Error, start);
            }
            match self.peek() {
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'"' => {
                    self.pos += 1;
                    return self.token(VerilogToken::StringLiteral, start);
                }
                _ => self.pos += 1,
            }
        }
    }

    fn lex_punctuation(&mut self, start: usize) -> Token {
        let b = self.peek();
        self.pos += 1;
        let kind = match b {
            b'(' => VerilogToken::LeftParen,
            b')' => VerilogToken::RightParen,
            b'[' => VerilogToken::LeftBracket,
            b']' => VerilogToken::RightBracket,
            b'{' => VerilogToken::LeftBrace,
            b'}' => VerilogToken::RightBrace,
            b',' => VerilogToken::Comma,
            b';' => VerilogToken::Semicolon,
            b'#' => VerilogToken::Hash,
            b'=' => {
                if self.peek() == b'=' {
                    self.eat_while(|c| c == b'=');
                    VerilogToken::Operator
                } else {
                    VerilogToken::Equals
                }
            }
            b'!' | b'<' | b'>' => {
                if self.peek() == b'=' {
                    self.eat_while(|c| c == b'=');
                }
                VerilogToken::Operator
            }
            b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^' | b'~' | b'?' | b':' | b'.'
            | b'@' => VerilogToken::Operator,
            _ => {
                // keep multi-byte characters whole so spans stay on char boundaries
                while !self.at_end() && (self.peek() & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                let text = String::from_utf8_lossy(&self.source[start..self.pos]).into_owned();
                self.error(
                    codes::UNRECOGNIZED_CHARACTER,
                    format!("unrecognized character '{text}'"),
                    self.span_from(start),
                );
                VerilogToken::Error
            }
        };
        self.token(kind, start)
    }
}

/// How much source text a compiler directive covers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum DirectiveExtent {
    /// Just the directive keyword (`` `endif ``).
    Word,
    /// The keyword and one macro name (`` `ifdef NAME ``).
    WordAndName,
    /// The rest of the line, with `\` continuations (`` `define ``).
    Line,
}

/// Classifies a compiler directive; `None` for a text macro usage.
fn directive_extent(name: &[u8]) -> Option<DirectiveExtent> {
    let extent = match name {
        b"else" | b"endif" | b"resetall" | b"celldefine" | b"endcelldefine"
        | b"nounconnected_drive" | b"undefineall" | b"end_keywords" => DirectiveExtent::Word,
        b"ifdef" | b"ifndef" | b"elsif" | b"undef" => DirectiveExtent::WordAndName,
        b"define" | b"timescale" | b"include" | b"default_nettype" | b"line" | b"pragma"
        | b"unconnected_drive" | b"begin_keywords" => DirectiveExtent::Line,
        _ => return None,
    };
    Some(extent)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_base_char(b: u8) -> bool {
    is_radix_char(b) || matches!(b, b's' | b'S')
}

fn is_radix_char(b: u8) -> bool {
    matches!(b.to_ascii_lowercase(), b'b' | b'o' | b'd' | b'h')
}
