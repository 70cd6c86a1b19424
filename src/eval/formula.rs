//! Decoding a formula noun into the rule it invokes.

use num_traits::ToPrimitive;

use super::trace::Rule;
use crate::error::{NockError, Result};
use crate::noun::Noun;

/// A formula, decoded once by shape. Every variant is one row of the
/// reduction table; a noun that fits none of them is `IllFormedFormula`.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula {
    /// `[[b c] d]`: pair the products of two formulas.
    Distribute { head: Noun, tail: Noun },
    /// `[0 b]`
    Slot { axis: Noun },
    /// `[1 b]`
    Constant { value: Noun },
    /// `[2 b c]`
    Evaluate { subject: Noun, formula: Noun },
    /// `[3 b]`
    CellTest { formula: Noun },
    /// `[4 b]`
    Increment { formula: Noun },
    /// `[5 b c]`
    Equals { left: Noun, right: Noun },
    /// `[6 b c d]`
    Branch { test: Noun, yes: Noun, no: Noun },
    /// `[7 b c]`
    Compose { first: Noun, then: Noun },
    /// `[8 b c]`
    Push { value: Noun, then: Noun },
    /// `[9 b c]`
    Invoke { axis: Noun, core: Noun },
    /// `[10 [b c] d]`
    Edit { axis: Noun, value: Noun, then: Noun },
    /// `[10 b c]` with `b` an atom.
    Hint { hint: Noun, formula: Noun },
}

fn split(noun: &Noun) -> Result<(&Noun, &Noun)> {
    noun.as_cell()
        .map(|cell| (cell.head(), cell.tail()))
        .ok_or(NockError::IllFormedFormula)
}

fn pair(noun: &Noun) -> Result<(Noun, Noun)> {
    let (a, b) = split(noun)?;
    Ok((a.clone(), b.clone()))
}

impl Formula {
    pub fn decode(formula: &Noun) -> Result<Formula> {
        let (op, arg) = split(formula)?;

        let opcode = match op {
            Noun::Cell(_) => {
                if arg.is_atom() {
                    return Err(NockError::IllFormedFormula);
                }
                return Ok(Formula::Distribute {
                    head: op.clone(),
                    tail: arg.clone(),
                });
            }
            Noun::Atom(value) => value.to_u8().ok_or(NockError::IllFormedFormula)?,
        };

        let decoded = match opcode {
            0 => Formula::Slot { axis: arg.clone() },
            1 => Formula::Constant { value: arg.clone() },
            2 => {
                let (subject, formula) = pair(arg)?;
                Formula::Evaluate { subject, formula }
            }
            3 => Formula::CellTest {
                formula: arg.clone(),
            },
            4 => Formula::Increment {
                formula: arg.clone(),
            },
            5 => {
                let (left, right) = pair(arg)?;
                Formula::Equals { left, right }
            }
            6 => {
                let (test, rest) = split(arg)?;
                let (yes, no) = pair(rest)?;
                Formula::Branch {
                    test: test.clone(),
                    yes,
                    no,
                }
            }
            7 => {
                let (first, then) = pair(arg)?;
                Formula::Compose { first, then }
            }
            8 => {
                let (value, then) = pair(arg)?;
                Formula::Push { value, then }
            }
            9 => {
                let (axis, core) = pair(arg)?;
                Formula::Invoke { axis, core }
            }
            10 => {
                let (hint, then) = split(arg)?;
                match hint {
                    Noun::Atom(_) => Formula::Hint {
                        hint: hint.clone(),
                        formula: then.clone(),
                    },
                    Noun::Cell(cell) => Formula::Edit {
                        axis: cell.head().clone(),
                        value: cell.tail().clone(),
                        then: then.clone(),
                    },
                }
            }
            _ => return Err(NockError::IllFormedFormula),
        };
        Ok(decoded)
    }

    pub fn rule(&self) -> Rule {
        match self {
            Formula::Distribute { .. } => Rule::Distribute,
            Formula::Slot { .. } => Rule::Slot,
            Formula::Constant { .. } => Rule::Constant,
            Formula::Evaluate { .. } => Rule::Evaluate,
            Formula::CellTest { .. } => Rule::CellTest,
            Formula::Increment { .. } => Rule::Increment,
            Formula::Equals { .. } => Rule::Equals,
            Formula::Branch { .. } => Rule::Branch,
            Formula::Compose { .. } => Rule::Compose,
            Formula::Push { .. } => Rule::Push,
            Formula::Invoke { .. } => Rule::Invoke,
            Formula::Edit { .. } => Rule::Edit,
            Formula::Hint { .. } => Rule::Hint,
        }
    }
}

/// `[2 [0 1] 2 [1 c d] [1 0] 2 [1 2 3] [1 0] 4 4 b]`: "if" spelled with the
/// primitive rules. Tests other than `0` and `1` crash inside it.
pub fn branch_rewrite(test: Noun, yes: Noun, no: Noun) -> Noun {
    let select = Noun::evaluate(
        Noun::constant(Noun::cell(Noun::atom(2), Noun::atom(3))),
        Noun::cell(
            Noun::constant(Noun::atom(0)),
            Noun::increment(Noun::increment(test)),
        ),
    );
    Noun::evaluate(
        Noun::slot(1),
        Noun::evaluate(
            Noun::constant(Noun::cell(yes, no)),
            Noun::cell(Noun::constant(Noun::atom(0)), select),
        ),
    )
}
