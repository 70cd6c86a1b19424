use super::ast::{Expr, Operator};
use super::lexeme::Lexeme;
use super::span::{Span, Spanned};
use crate::diagnostic::Diagnostic;

const MAX_NESTING_DEPTH: u32 = 1024;

pub(crate) struct Parser {
    tokens: Vec<Spanned<Lexeme>>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
    /// Set once nesting overflows; the rest of the input is skipped and no
    /// further errors are reported.
    gave_up: bool,
}

impl Parser {
    /// `tokens` must end with `Lexeme::Eof`.
    pub(crate) fn new(tokens: Vec<Spanned<Lexeme>>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            depth: 0,
            gave_up: false,
        }
    }

    fn enter_nesting(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            self.error_with_help(
                "nesting depth exceeded (maximum 1024 levels)",
                "build deeply nested nouns programmatically instead of writing them out",
            );
            self.gave_up = true;
            self.pos = self.tokens.len() - 1;
            return false;
        }
        true
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Parse exactly one expression spanning the whole input.
    pub(crate) fn parse_input(mut self) -> Result<Spanned<Expr>, Vec<Diagnostic>> {
        let expr = self.parse_expr();
        if !self.gave_up && !self.at(&Lexeme::Eof) {
            self.error_with_help(
                &format!("expected end of input, found {}", self.peek().description()),
                "several nouns in a row form a cell only inside brackets: [a b c]",
            );
        }
        if self.diagnostics.is_empty() {
            Ok(expr)
        } else {
            Err(self.diagnostics)
        }
    }

    fn parse_expr(&mut self) -> Spanned<Expr> {
        let span = self.current_span();
        let op = match self.peek() {
            Lexeme::Atom(value) => {
                let value = value.clone();
                self.advance();
                return Spanned::new(Expr::Atom(value), span);
            }
            Lexeme::LBracket => return self.parse_cell(),
            Lexeme::Tar => Operator::Tar,
            Lexeme::Wut => Operator::Wut,
            Lexeme::Lus => Operator::Lus,
            Lexeme::Tis => Operator::Tis,
            Lexeme::Fas => Operator::Fas,
            Lexeme::RBracket | Lexeme::Eof => {
                if !self.gave_up {
                    self.error_at_current(&format!(
                        "expected a noun, found {}",
                        self.peek().description()
                    ));
                }
                self.advance();
                return Spanned::new(Expr::Atom(Default::default()), span);
            }
        };

        self.advance();
        if !self.enter_nesting() {
            return Spanned::new(Expr::Atom(Default::default()), span);
        }
        let operand = self.parse_expr();
        self.exit_nesting();
        let span = span.merge(operand.span);
        Spanned::new(
            Expr::Apply {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    fn parse_cell(&mut self) -> Spanned<Expr> {
        let start = self.expect(&Lexeme::LBracket);
        if !self.enter_nesting() {
            return Spanned::new(Expr::Atom(Default::default()), start);
        }
        let mut items = Vec::new();
        while !self.at(&Lexeme::RBracket) && !self.at(&Lexeme::Eof) {
            items.push(self.parse_expr());
        }
        self.exit_nesting();
        let end = self.expect(&Lexeme::RBracket);
        let span = start.merge(end);

        if items.len() < 2 && !self.gave_up {
            let message = if items.is_empty() {
                "empty brackets are not a noun"
            } else {
                "a cell needs at least two nouns"
            };
            self.diagnostics.push(
                Diagnostic::error(message.to_string(), span)
                    .with_help("write a cell as [head tail]; [a b c] means [a [b c]]".to_string()),
            );
        }
        Spanned::new(Expr::Cell(items), span)
    }

    // --- Utility methods ---

    fn peek(&self) -> &Lexeme {
        &self.tokens[self.pos].node
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn advance(&mut self) -> &Spanned<Lexeme> {
        let tok = &self.tokens[self.pos];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, token: &Lexeme) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn expect(&mut self, token: &Lexeme) -> Span {
        if self.at(token) {
            let span = self.current_span();
            self.advance();
            span
        } else {
            if !self.gave_up {
                self.error_at_current(&format!(
                    "expected {}, found {}",
                    token.description(),
                    self.peek().description()
                ));
            }
            self.current_span()
        }
    }

    fn error_at_current(&mut self, msg: &str) {
        self.diagnostics
            .push(Diagnostic::error(msg.to_string(), self.current_span()));
    }

    fn error_with_help(&mut self, msg: &str, help: &str) {
        self.diagnostics.push(
            Diagnostic::error(msg.to_string(), self.current_span()).with_help(help.to_string()),
        );
    }
}
