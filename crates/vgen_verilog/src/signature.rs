//! Recursive-descent scan of a module body for its signature.
//!
//! The scan runs over the token stream of the first `module ... endmodule`
//! block. It only understands the clauses that make up a signature (the
//! module name, `parameter` declarations and `input`/`output`/`inout`
//! declarations) and steps over every other token.

use crate::codes;
use crate::error::ExtractError;
use crate::model::{Direction, ModuleInfo, Parameter, Port};
use crate::token::{Token, VerilogToken};
use tracing::{debug, trace};
use vgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use vgen_source::Span;

/// Removes `task ... endtask` and `function ... endfunction` token runs.
///
/// Each block runs from its keyword to the first matching end keyword. A block
/// that is never closed is kept and reported.
pub(crate) fn strip_noise_blocks(tokens: Vec<Token>, sink: &DiagnosticSink) -> Vec<Token> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let block = match tokens[i].kind {
            VerilogToken::Task => Some(("task", VerilogToken::Endtask)),
            VerilogToken::Function => Some(("function", VerilogToken::Endfunction)),
            _ => None,
        };
        if let Some((keyword, close)) = block {
            if let Some(len) = tokens[i..].iter().position(|t| t.kind == close) {
                trace!(keyword, tokens = len + 1, "skipped block");
                i += len + 1;
                continue;
            }
            sink.emit(
                Diagnostic::warning(
                    codes::UNTERMINATED_BLOCK,
                    format!("`{keyword}` block is never closed"),
                    tokens[i].span,
                )
                .with_note("declarations inside it are treated as module-level declarations"),
            );
        }
        kept.push(tokens[i]);
        i += 1;
    }
    kept
}

/// Finds the first `module` keyword and the first `endmodule` after it.
///
/// Returns the token index just past `module` and the index of `endmodule`.
pub(crate) fn locate_module(
    tokens: &[Token],
    sink: &DiagnosticSink,
) -> Result<(usize, usize), ExtractError> {
    let Some(module) = tokens.iter().position(|t| t.kind == VerilogToken::Module) else {
        return Err(report(sink, codes::NO_MODULE, ExtractError::NoModule, Span::DUMMY));
    };
    let body = module + 1;
    match tokens[body..]
        .iter()
        .position(|t| t.kind == VerilogToken::Endmodule)
    {
        Some(len) => Ok((body, body + len)),
        None => {
            let module_span = tokens[module].span;
            Err(report(
                sink,
                codes::MISSING_ENDMODULE,
                ExtractError::MissingEndmodule { module_span },
                module_span,
            ))
        }
    }
}

/// Emits the diagnostic that accompanies an extraction failure.
fn report(
    sink: &DiagnosticSink,
    code: DiagnosticCode,
    err: ExtractError,
    span: Span,
) -> ExtractError {
    let mut diag = Diagnostic::error(code, err.to_string(), span);
    if err == ExtractError::NoModule {
        diag = diag.with_help("the input must contain `module <name> ... endmodule`");
    }
    sink.emit(diag);
    err
}

/// Scanner over the body of one module, between `module` and `endmodule`.
pub(crate) struct SignatureScanner<'src> {
    tokens: Vec<Token>,
    pos: usize,
    /// Index of the `endmodule` token; the scanner never moves past it.
    end: usize,
    source: &'src str,
    sink: &'src DiagnosticSink,
}

impl<'src> SignatureScanner<'src> {
    pub(crate) fn new(
        tokens: Vec<Token>,
        body: usize,
        end: usize,
        source: &'src str,
        sink: &'src DiagnosticSink,
    ) -> Self {
        Self {
            tokens,
            pos: body,
            end,
            source,
            sink,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> VerilogToken {
        self.tokens[self.pos.min(self.end)].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos.min(self.end)].span
    }

    fn peek_kind(&self, offset: usize) -> VerilogToken {
        self.tokens[(self.pos + offset).min(self.end)].kind
    }

    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn at(&self, kind: VerilogToken) -> bool {
        self.current() == kind
    }

    fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: VerilogToken) -> bool {
        if self.at(kind) && !self.at_end() {
            self.advance();
            true
        } else {
            false
        }
    }

    fn text(&self, span: Span) -> &'src str {
        span.text(self.source)
    }

    fn warn(&self, code: DiagnosticCode, msg: impl Into<String>, span: Span) {
        self.sink.emit(Diagnostic::warning(code, msg, span));
    }

    // ========================================================================
    // Signature
    // ========================================================================

    /// Scans the module body and builds its signature.
    pub(crate) fn scan(mut self) -> Result<ModuleInfo, ExtractError> {
        let name_span = self.current_span();
        if self.at_end() || !self.current().is_identifier() {
            return Err(report(
                self.sink,
                codes::MISSING_MODULE_NAME,
                ExtractError::MissingName { span: name_span },
                name_span,
            ));
        }
        let mut info = ModuleInfo::new(self.text(name_span));
        if self.current() == VerilogToken::EscapedIdentifier {
            self.sink.emit(
                Diagnostic::warning(
                    codes::ESCAPED_MODULE_NAME,
                    format!("module name `{}` is an escaped identifier", info.name),
                    name_span,
                )
                .with_note("escaped names end at whitespace; generated text adds a space after them")
                .with_help("template text joined to `${MODULE_NAME}`, such as `u_${MODULE_NAME}`, must be edited by hand"),
            );
        }
        self.advance();

        while !self.at_end() {
            match self.current() {
                VerilogToken::Parameter => self.parameter_clause(&mut info),
                VerilogToken::Input => self.port_clause(Direction::Input, &mut info),
                VerilogToken::Output => self.port_clause(Direction::Output, &mut info),
                VerilogToken::Inout => self.port_clause(Direction::Inout, &mut info),
                _ => self.advance(),
            }
        }

        debug!(
            module = %info.name,
            parameters = info.parameters.len(),
            inputs = info.inputs.len(),
            outputs = info.outputs.len(),
            inouts = info.inouts.len(),
            "extracted module signature"
        );
        Ok(info)
    }

    /// Parses `parameter [type] [range] NAME = expr {, NAME = expr}`.
    fn parameter_clause(&mut self, info: &mut ModuleInfo) {
        let keyword = self.current_span();
        self.advance();

        loop {
            self.skip_parameter_type();
            if !self.current().is_identifier() {
                self.warn(
                    codes::PARAMETER_WITHOUT_VALUE,
                    "`parameter` is not followed by a name",
                    keyword,
                );
                return;
            }
            let name_span = self.current_span();
            let name = self.text(name_span);
            self.advance();

            if !self.eat(VerilogToken::Equals) {
                self.warn(
                    codes::PARAMETER_WITHOUT_VALUE,
                    format!("parameter `{name}` has no value and is skipped"),
                    name_span,
                );
                return;
            }
            match self.skip_expression() {
                Some(value) => {
                    let value = self.text(value);
                    trace!(name, value, "parameter");
                    info.parameters.push(Parameter::new(name, value));
                }
                None => self.warn(
                    codes::PARAMETER_WITHOUT_VALUE,
                    format!("parameter `{name}` has an empty value and is skipped"),
                    name_span,
                ),
            }

            // `parameter A = 1, B = 2` continues the same clause
            if self.at(VerilogToken::Comma)
                && self.peek_kind(1).is_identifier()
                && self.peek_kind(2) == VerilogToken::Equals
            {
                self.advance();
                continue;
            }
            return;
        }
    }

    fn skip_parameter_type(&mut self) {
        loop {
            let kind = self.current();
            if kind == VerilogToken::LeftBracket {
                self.skip_brackets();
            } else if kind.is_qualifier() || self.at_type_name() {
                self.advance();
            } else {
                return;
            }
        }
    }

    /// `true` when the current identifier or macro names a type: it is
    /// directly followed by another name or a type keyword.
    fn at_type_name(&self) -> bool {
        matches!(
            self.current(),
            VerilogToken::Identifier | VerilogToken::MacroUsage
        ) && {
            let next = self.peek_kind(1);
            next.is_identifier() || next.is_qualifier()
        }
    }

    /// Parses `<direction> [qualifiers] [range] name [= default] {, name [= default]}`.
    fn port_clause(&mut self, direction: Direction, info: &mut ModuleInfo) {
        let keyword = self.current_span();
        self.advance();

        let mut range: Option<Span> = None;
        loop {
            let kind = self.current();
            if kind == VerilogToken::LeftBracket {
                let dims = self.skip_brackets();
                range = Some(range.map_or(dims, |r| r.merge(dims)));
            } else if kind.is_qualifier() || self.at_type_name() {
                self.advance();
            } else {
                break;
            }
        }
        let range = range.map_or("", |r| self.text(r));

        let mut count = 0usize;
        while self.current().is_identifier() && !self.at_end() {
            let name_span = self.current_span();
            let name = self.text(name_span);
            self.advance();

            // unpacked dimensions belong to the name, not the port range
            while self.at(VerilogToken::LeftBracket) {
                self.skip_brackets();
            }
            if self.eat(VerilogToken::Equals) {
                self.skip_expression();
                self.sink.emit(
                    Diagnostic::warning(
                        codes::PORT_DEFAULT_DISCARDED,
                        format!("default value of port `{name}` discarded"),
                        name_span,
                    )
                    .with_note("generated declarations never carry port defaults"),
                );
            }

            trace!(%direction, name, range, "port");
            info.ports_mut(direction).push(Port::new(name, range));
            count += 1;

            if self.at(VerilogToken::Comma) && self.peek_kind(1).is_identifier() {
                self.advance();
            } else {
                break;
            }
        }

        if count == 0 {
            self.warn(
                codes::EMPTY_PORT_CLAUSE,
                format!("`{direction}` declares no port names"),
                keyword,
            );
        }
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Skips a run of bracket-balanced tokens starting at `[`.
    ///
    /// Returns the span from the opening bracket to the matching `]`, or to the
    /// last consumed token if the range is never closed.
    fn skip_brackets(&mut self) -> Span {
        let start = self.current_span();
        let mut depth = 0usize;
        while !self.at_end() {
            match self.current() {
                VerilogToken::LeftBracket => depth += 1,
                VerilogToken::RightBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let span = start.merge(self.current_span());
                        self.advance();
                        return span;
                    }
                }
                VerilogToken::Semicolon => break,
                _ => {}
            }
            self.advance();
        }
        start.merge(self.prev_span())
    }

    /// Skips an expression up to the next `,`, `;` or closing delimiter at
    /// nesting depth zero.
    ///
    /// Returns the span from the first to the last consumed token, or `None`
    /// if the expression is empty.
    fn skip_expression(&mut self) -> Option<Span> {
        let mut depth = 0usize;
        let mut span: Option<Span> = None;
        while !self.at_end() {
            let kind = self.current();
            match kind {
                VerilogToken::LeftParen | VerilogToken::LeftBracket | VerilogToken::LeftBrace => {
                    depth += 1
                }
                VerilogToken::RightParen
                | VerilogToken::RightBracket
                | VerilogToken::RightBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                VerilogToken::Semicolon => break,
                VerilogToken::Comma if depth == 0 => break,
                VerilogToken::Parameter | VerilogToken::Localparam if depth == 0 => break,
                k if depth == 0 && k.is_direction() => break,
                _ => {}
            }
            let s = self.current_span();
            span = Some(span.map_or(s, |acc| acc.merge(s)));
            self.advance();
        }
        span
    }
}
