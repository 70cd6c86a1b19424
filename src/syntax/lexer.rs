use num_bigint::BigUint;

use super::lexeme::Lexeme;
use super::span::{Span, Spanned};
use crate::diagnostic::Diagnostic;

pub struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> (Vec<Spanned<Lexeme>>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.node == Lexeme::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Spanned<Lexeme> {
        loop {
            self.skip_whitespace();

            if self.pos >= self.source.len() {
                return self.make_token(Lexeme::Eof, self.pos, self.pos);
            }

            let start = self.pos;
            let ch = self.source[self.pos];

            if ch.is_ascii_digit() {
                return self.scan_atom();
            }

            if let Some(tok) = self.scan_symbol(start) {
                return tok;
            }
            // scan_symbol returned None → error was recorded, try again
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn scan_atom(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        match BigUint::parse_bytes(&self.source[start..self.pos], 10) {
            Some(n) => self.make_token(Lexeme::Atom(n), start, self.pos),
            None => {
                self.diagnostics.push(Diagnostic::error(
                    "malformed atom".to_string(),
                    Span::new(start as u32, self.pos as u32),
                ));
                self.make_token(Lexeme::Atom(BigUint::default()), start, self.pos)
            }
        }
    }

    fn scan_symbol(&mut self, start: usize) -> Option<Spanned<Lexeme>> {
        let ch = self.source[self.pos];
        self.pos += 1;

        let token = match ch {
            b'[' => Lexeme::LBracket,
            b']' => Lexeme::RBracket,
            b'*' => Lexeme::Tar,
            b'?' => Lexeme::Wut,
            b'+' => Lexeme::Lus,
            b'=' => Lexeme::Tis,
            b'/' => Lexeme::Fas,
            b'-' => {
                self.diagnostics.push(
                    Diagnostic::error(
                        "unexpected '-'; atoms are natural numbers".to_string(),
                        Span::new(start as u32, self.pos as u32),
                    )
                    .with_help("Nock has no negative numbers".to_string()),
                );
                return None;
            }
            _ => {
                // Step over the whole UTF-8 sequence so the span covers one character.
                while self.pos < self.source.len() && (self.source[self.pos] & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                let text = String::from_utf8_lossy(&self.source[start..self.pos]).into_owned();
                self.diagnostics.push(
                    Diagnostic::error(
                        format!("unexpected character '{}'", text),
                        Span::new(start as u32, self.pos as u32),
                    )
                    .with_help(
                        "nouns are written with atoms, '[' and ']'; operators are * ? + = /"
                            .to_string(),
                    ),
                );
                return None;
            }
        };

        Some(self.make_token(token, start, self.pos))
    }

    fn make_token(&self, token: Lexeme, start: usize, end: usize) -> Spanned<Lexeme> {
        Spanned::new(token, Span::new(start as u32, end as u32))
    }
}
