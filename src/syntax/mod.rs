//! Bracket notation: `[a b c]` cells, decimal atoms, and the prefix
//! pseudo-operators `* ? + = /`.

pub mod ast;
pub mod lexeme;
pub mod lexer;
pub mod parser;
pub mod span;

use crate::diagnostic::Diagnostic;
use crate::noun::Noun;
use ast::Expr;
use lexer::Lexer;
use parser::Parser;
use span::Spanned;

/// Parse one expression, operators allowed.
pub fn parse(source: &str) -> Result<Spanned<Expr>, Vec<Diagnostic>> {
    let (tokens, lex_errors) = Lexer::new(source).tokenize();
    if !lex_errors.is_empty() {
        return Err(lex_errors);
    }
    Parser::new(tokens).parse_input()
}

/// Parse a literal noun. Operators are rejected.
pub fn parse_noun(source: &str) -> Result<Noun, Vec<Diagnostic>> {
    let expr = parse(source)?;
    expr.to_noun().map_err(|span| {
        vec![Diagnostic::error(
            "operators are not allowed in a literal noun".to_string(),
            span,
        )]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NockError;
    use crate::eval::{Derivation, Interpreter};
    use super::span::Span;

    fn run(source: &str) -> Result<Noun, Spanned<NockError>> {
        parse(source).unwrap().run(&mut Interpreter::new())
    }

    fn noun(source: &str) -> Noun {
        parse_noun(source).unwrap()
    }

    #[test]
    fn test_parse_noun_right_associates() {
        assert_eq!(noun("[1 2 3]"), noun("[1 [2 3]]"));
        assert_eq!(
            noun("[[1 2] 3 4]"),
            Noun::cell(
                Noun::cell(Noun::atom(1), Noun::atom(2)),
                Noun::cell(Noun::atom(3), Noun::atom(4))
            )
        );
    }

    #[test]
    fn test_parse_noun_rejects_operators() {
        let errs = parse_noun("[1 +2]").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].span, Span::new(3, 5));
    }

    #[test]
    fn test_lex_errors_stop_parsing() {
        let errs = parse("[1 a]").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("'a'"));
    }

    #[test]
    fn test_operators() {
        assert_eq!(run("*[42 4 0 1]"), Ok(Noun::atom(43)));
        assert_eq!(run("?[1 2]"), Ok(Noun::yes()));
        assert_eq!(run("?7"), Ok(Noun::no()));
        assert_eq!(run("+41"), Ok(Noun::atom(42)));
        assert_eq!(run("=[3 3]"), Ok(Noun::yes()));
        assert_eq!(run("/[3 [4 5]]"), Ok(Noun::atom(5)));
    }

    #[test]
    fn test_operators_apply_innermost_first() {
        assert_eq!(run("+*[41 4 0 1]"), Ok(Noun::atom(43)));
        assert_eq!(run("=[+1 2]"), Ok(Noun::yes()));
        assert_eq!(run("[+1 ?2]").map(|n| n.to_string()), Ok("[2 1]".to_string()));
    }

    #[test]
    fn test_bare_noun_is_reduced() {
        assert_eq!(run("[42 [4 0 1]]"), Ok(Noun::atom(43)));
        assert_eq!(
            run("42"),
            Err(Spanned::new(NockError::IllFormedFormula, Span::new(0, 2)))
        );
    }

    #[test]
    fn test_failure_points_at_application() {
        let err = run("[1 +[2 3]]").unwrap_err();
        assert_eq!(err.node, NockError::NotAnAtom);
        assert_eq!(err.span, Span::new(3, 9));

        let err = run("/5").unwrap_err();
        assert_eq!(err.node, NockError::NotACell);

        let err = run("=4").unwrap_err();
        assert_eq!(err.node, NockError::NotACell);
    }

    #[test]
    fn test_traced_operators() {
        let mut interpreter = Interpreter::with_trace(Derivation::new());
        let product = parse("/[2 [4 5]]")
            .unwrap()
            .run(&mut interpreter)
            .unwrap();
        assert_eq!(product, Noun::atom(4));
        assert_eq!(interpreter.trace().events().len(), 1);
    }
}
