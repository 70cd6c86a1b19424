use num_bigint::BigUint;

use super::span::{Span, Spanned};
use crate::error::NockError;
use crate::eval::{self, Interpreter, Trace};
use crate::noun::Noun;

/// A pseudo-operator written in front of a noun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    /// `*`: reduce `[subject formula]`.
    Tar,
    /// `?`: cell test.
    Wut,
    /// `+`: increment.
    Lus,
    /// `=`: equality of a cell's halves.
    Tis,
    /// `/`: tree addressing, `[axis noun]`.
    Fas,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Tar => '*',
            Operator::Wut => '?',
            Operator::Lus => '+',
            Operator::Tis => '=',
            Operator::Fas => '/',
        }
    }

    pub fn apply<T: Trace>(
        self,
        interpreter: &mut Interpreter<T>,
        noun: &Noun,
    ) -> Result<Noun, NockError> {
        match self {
            Operator::Tar => interpreter.tar(noun),
            Operator::Wut => Ok(eval::wut(noun)),
            Operator::Lus => eval::lus(noun),
            Operator::Tis => eval::tis(noun),
            Operator::Fas => {
                let cell = noun.as_cell().ok_or(NockError::NotACell)?;
                interpreter.fas(cell.head(), cell.tail())
            }
        }
    }
}

/// A parsed expression: a noun, possibly with operators applied inside it.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Atom(BigUint),
    /// `[a b c ...]`, at least two items, associated to the right.
    Cell(Vec<Spanned<Expr>>),
    Apply {
        op: Operator,
        operand: Box<Spanned<Expr>>,
    },
}

impl Spanned<Expr> {
    /// The literal noun, or the span of the first operator that prevents one.
    pub fn to_noun(&self) -> Result<Noun, Span> {
        match &self.node {
            Expr::Atom(value) => Ok(Noun::Atom(value.clone())),
            Expr::Cell(items) => {
                let nouns = items
                    .iter()
                    .map(|item| item.to_noun())
                    .collect::<Result<Vec<_>, _>>()?;
                Noun::tuple(nouns).ok_or(self.span)
            }
            Expr::Apply { .. } => Err(self.span),
        }
    }

    /// Apply every operator, innermost first. A failure carries the span of
    /// the application that crashed.
    pub fn reduce<T: Trace>(
        &self,
        interpreter: &mut Interpreter<T>,
    ) -> Result<Noun, Spanned<NockError>> {
        match &self.node {
            Expr::Atom(value) => Ok(Noun::Atom(value.clone())),
            Expr::Cell(items) => {
                let nouns = items
                    .iter()
                    .map(|item| item.reduce(interpreter))
                    .collect::<Result<Vec<_>, _>>()?;
                Noun::tuple(nouns).ok_or(Spanned::new(NockError::IllFormedFormula, self.span))
            }
            Expr::Apply { op, operand } => {
                let noun = operand.reduce(interpreter)?;
                op.apply(interpreter, &noun)
                    .map_err(|err| Spanned::new(err, self.span))
            }
        }
    }

    /// Evaluate a line of input: an expression led by an operator is reduced
    /// as written, a bare noun is handed to `*`.
    pub fn run<T: Trace>(
        &self,
        interpreter: &mut Interpreter<T>,
    ) -> Result<Noun, Spanned<NockError>> {
        let noun = self.reduce(interpreter)?;
        match self.node {
            Expr::Apply { .. } => Ok(noun),
            _ => interpreter
                .tar(&noun)
                .map_err(|err| Spanned::new(err, self.span)),
        }
    }
}
