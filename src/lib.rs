//! A reference evaluator for Nock 4K.
//!
//! Nouns are atoms (natural numbers of any size) or cells of two nouns.
//! [`tar`] reduces `*[subject formula]` by the published rules, [`fas`]
//! addresses a subtree by axis, and an [`Interpreter`] adds tracing and a step
//! budget on top.
//!
//! ```
//! use nock::{tar, Noun};
//!
//! let program: Noun = "[42 [4 0 1]]".parse().unwrap();
//! assert_eq!(tar(&program), Ok(Noun::atom(43)));
//! ```

pub mod axis;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod eval;
pub mod noun;
pub mod syntax;

pub use error::{NockError, Result};
pub use eval::{fas, lus, nock, tar, tis, wut, Interpreter};
pub use noun::Noun;

use diagnostic::{render_diagnostics, Diagnostic};
use syntax::ast::Expr;
use syntax::span::Spanned;

/// Parse an expression, rendering any diagnostics to stderr.
pub fn parse_source(
    source: &str,
    filename: &str,
) -> std::result::Result<Spanned<Expr>, Vec<Diagnostic>> {
    syntax::parse(source).map_err(|errors| {
        render_diagnostics(&errors, filename, source);
        errors
    })
}
