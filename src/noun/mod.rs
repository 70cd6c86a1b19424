//! Nouns: the single data type of Nock.
//!
//! A noun is either an atom (a natural number of any size) or a cell (an
//! ordered pair of nouns). Nouns are immutable values; cells are shared
//! through reference counting, so handing a subtree to a new noun never
//! copies it.
//!
//! Lists and formulas are only conventions over cells: brackets associate to
//! the right, so `[a b c]` is the noun `[a [b c]]`.

mod display;

use std::rc::Rc;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};

use crate::diagnostic::Diagnostic;
use crate::error::NockError;

/// A Nock noun.
#[derive(Clone)]
pub enum Noun {
    /// A natural number of arbitrary width.
    Atom(BigUint),
    /// An ordered pair `[head tail]`.
    Cell(Rc<Cell>),
}

/// The payload of a cell noun.
pub struct Cell {
    head: Noun,
    tail: Noun,
}

impl Cell {
    pub fn head(&self) -> &Noun {
        &self.head
    }

    pub fn tail(&self) -> &Noun {
        &self.tail
    }
}

impl Noun {
    /// Create an atom noun.
    pub fn atom(value: u64) -> Self {
        Noun::Atom(BigUint::from(value))
    }

    /// Create a cell noun `[a b]`.
    pub fn cell(head: Noun, tail: Noun) -> Self {
        Noun::Cell(Rc::new(Cell { head, tail }))
    }

    /// Right-associate a sequence: `[a b c d]` is `[a [b [c d]]]`.
    ///
    /// A single item is returned as is; an empty sequence has no noun.
    pub fn tuple<I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = Noun>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut items = items.into_iter().rev();
        let last = items.next()?;
        Some(items.fold(last, |tail, head| Noun::cell(head, tail)))
    }

    /// Loobean "yes": atom `0`.
    pub fn yes() -> Self {
        Noun::Atom(BigUint::zero())
    }

    /// Loobean "no": atom `1`.
    pub fn no() -> Self {
        Noun::atom(1)
    }

    /// Loobean for a Rust boolean.
    pub fn loobean(value: bool) -> Self {
        if value {
            Noun::yes()
        } else {
            Noun::no()
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Noun::Atom(_))
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Noun::Cell(_))
    }

    pub fn as_atom(&self) -> Option<&BigUint> {
        match self {
            Noun::Atom(value) => Some(value),
            Noun::Cell(_) => None,
        }
    }

    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            Noun::Atom(_) => None,
            Noun::Cell(cell) => Some(cell),
        }
    }

    /// The atom's value if it is an atom small enough for `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_atom().and_then(|value| value.to_u64())
    }

    // ── Formula builders ──

    /// `[0 axis]`
    pub fn slot(axis: u64) -> Self {
        Noun::cell(Noun::atom(0), Noun::atom(axis))
    }

    /// `[1 value]`: `value`, whatever the subject.
    pub fn constant(value: Noun) -> Self {
        Noun::cell(Noun::atom(1), value)
    }

    /// `[2 subject formula]`: both halves are computed, then reduced
    /// together.
    pub fn evaluate(subject: Noun, formula: Noun) -> Self {
        Noun::cell(Noun::atom(2), Noun::cell(subject, formula))
    }

    /// `[3 formula]`
    pub fn cell_test(noun: Noun) -> Self {
        Noun::cell(Noun::atom(3), noun)
    }

    /// `[4 formula]`
    pub fn increment(noun: Noun) -> Self {
        Noun::cell(Noun::atom(4), noun)
    }

    /// `[5 a b]`
    pub fn equals(a: Noun, b: Noun) -> Self {
        Noun::cell(Noun::atom(5), Noun::cell(a, b))
    }

    /// `[6 test yes no]`
    pub fn branch(test: Noun, yes: Noun, no: Noun) -> Self {
        Noun::cell(Noun::atom(6), Noun::cell(test, Noun::cell(yes, no)))
    }

    /// `[7 a b]`: `b` runs against the product of `a`.
    pub fn compose(a: Noun, b: Noun) -> Self {
        Noun::cell(Noun::atom(7), Noun::cell(a, b))
    }

    /// `[8 a b]`: `b` runs against `[product-of-a subject]`.
    pub fn push(a: Noun, b: Noun) -> Self {
        Noun::cell(Noun::atom(8), Noun::cell(a, b))
    }

    /// `[9 axis core]`: compute the core, then run its arm at `axis`.
    pub fn invoke(axis: u64, core: Noun) -> Self {
        Noun::cell(Noun::atom(9), Noun::cell(Noun::atom(axis), core))
    }

    /// `[10 hint formula]`. The hint never changes the product.
    pub fn hint(hint: u64, formula: Noun) -> Self {
        Noun::cell(Noun::atom(10), Noun::cell(Noun::atom(hint), formula))
    }

    /// `[10 [axis value] then]`: edit the subject at `axis`
    /// with the product of `value`, then evaluate `then` against it.
    pub fn edit(axis: u64, value: Noun, then: Noun) -> Self {
        Noun::cell(
            Noun::atom(10),
            Noun::cell(Noun::cell(Noun::atom(axis), value), then),
        )
    }
}

impl PartialEq for Noun {
    fn eq(&self, other: &Noun) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Noun::Atom(x), Noun::Atom(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Noun::Cell(x), Noun::Cell(y)) => {
                    if Rc::ptr_eq(x, y) {
                        continue;
                    }
                    pending.push((&x.tail, &y.tail));
                    pending.push((&x.head, &y.head));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Noun {}

// Long right-nested lists would otherwise drop recursively.
impl Drop for Cell {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        detach(&mut self.head, &mut orphans);
        detach(&mut self.tail, &mut orphans);
        while let Some(shared) = orphans.pop() {
            if let Ok(mut cell) = Rc::try_unwrap(shared) {
                detach(&mut cell.head, &mut orphans);
                detach(&mut cell.tail, &mut orphans);
            }
        }
    }
}

fn detach(slot: &mut Noun, orphans: &mut Vec<Rc<Cell>>) {
    if slot.is_cell() {
        if let Noun::Cell(cell) = std::mem::replace(slot, Noun::Atom(BigUint::zero())) {
            orphans.push(cell);
        }
    }
}

impl From<u64> for Noun {
    fn from(value: u64) -> Self {
        Noun::atom(value)
    }
}

impl From<u32> for Noun {
    fn from(value: u32) -> Self {
        Noun::atom(u64::from(value))
    }
}

impl From<BigUint> for Noun {
    fn from(value: BigUint) -> Self {
        Noun::Atom(value)
    }
}

impl TryFrom<i64> for Noun {
    type Error = NockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Noun::atom)
            .map_err(|_| NockError::InvalidAtom)
    }
}

impl TryFrom<BigInt> for Noun {
    type Error = NockError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        value
            .to_biguint()
            .map(Noun::Atom)
            .ok_or(NockError::InvalidAtom)
    }
}

impl FromStr for Noun {
    type Err = Vec<Diagnostic>;

    /// Parse a literal noun in bracket notation, e.g. `[42 [4 0 1]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::syntax::parse_noun(s)
    }
}
