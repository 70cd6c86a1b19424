//! Tree addressing.
//!
//! Every nonzero atom names a position in a noun: `1` is the root, and for a
//! position `a`, `2a` is its head and `2a + 1` its tail. Reading the bits of
//! an axis below its leading `1` from most to least significant gives the path
//! from the root: `0` steps into the head, `1` into the tail.
//!
//! ```text
//!          1
//!      2       3
//!    4   5   6   7
//!              14  15
//! ```

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{NockError, Result};
use crate::noun::Noun;

/// Which line of `/` an axis selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// `/[1 a]  a`
    Root,
    /// `/[2 a b]  a`
    Head,
    /// `/[3 a b]  b`
    Tail,
    /// `/[(a + a) b]  /[2 /[a b]]`
    HeadOf,
    /// `/[(a + a + 1) b]  /[3 /[a b]]`
    TailOf,
}

impl Access {
    /// Classify an axis, rejecting `0`.
    pub fn of(axis: &BigUint) -> Result<Access> {
        if axis.is_zero() {
            return Err(NockError::InvalidAddress);
        }
        if axis.is_one() {
            return Ok(Access::Root);
        }
        let tail = axis.bit(0);
        Ok(match (axis.bits(), tail) {
            (2, false) => Access::Head,
            (2, true) => Access::Tail,
            (_, false) => Access::HeadOf,
            (_, true) => Access::TailOf,
        })
    }
}

fn axis_of(axis: &Noun) -> Result<&BigUint> {
    match axis {
        Noun::Atom(value) if !value.is_zero() => Ok(value),
        _ => Err(NockError::InvalidAddress),
    }
}

/// `/[axis noun]`: the subtree of `noun` at `axis`.
pub fn fas(axis: &Noun, noun: &Noun) -> Result<Noun> {
    let axis = axis_of(axis)?;
    let mut cursor = noun;
    for bit in (0..axis.bits() - 1).rev() {
        let cell = cursor.as_cell().ok_or(NockError::AddressOutOfBounds)?;
        cursor = if axis.bit(bit) { cell.tail() } else { cell.head() };
    }
    Ok(cursor.clone())
}

/// `#[axis value target]`: `target` with the subtree at `axis` replaced by
/// `value`. Untouched subtrees are shared with `target`.
pub fn edit(axis: &Noun, value: Noun, target: &Noun) -> Result<Noun> {
    let axis = axis_of(axis)?;

    // Siblings passed on the way down, with the side we descended into.
    let mut spine: Vec<(bool, Noun)> = Vec::new();
    let mut cursor = target;
    for bit in (0..axis.bits() - 1).rev() {
        let cell = cursor.as_cell().ok_or(NockError::AddressOutOfBounds)?;
        if axis.bit(bit) {
            spine.push((true, cell.head().clone()));
            cursor = cell.tail();
        } else {
            spine.push((false, cell.tail().clone()));
            cursor = cell.head();
        }
    }

    let mut rebuilt = value;
    while let Some((went_tail, sibling)) = spine.pop() {
        rebuilt = if went_tail {
            Noun::cell(sibling, rebuilt)
        } else {
            Noun::cell(rebuilt, sibling)
        };
    }
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Noun {
        "[[4 5] [6 14 15]]".parse().unwrap()
    }

    #[test]
    fn test_fas_named_positions() {
        let tree = tree();
        assert_eq!(fas(&Noun::atom(1), &tree).unwrap(), tree);
        assert_eq!(fas(&Noun::atom(2), &tree).unwrap().to_string(), "[4 5]");
        assert_eq!(fas(&Noun::atom(3), &tree).unwrap().to_string(), "[6 [14 15]]");
        assert_eq!(fas(&Noun::atom(7), &tree).unwrap().to_string(), "[14 15]");
        // Leaves hold their own axis.
        for leaf in [4u64, 5, 6, 14, 15] {
            assert_eq!(fas(&Noun::atom(leaf), &tree).unwrap(), Noun::atom(leaf));
        }
    }

    #[test]
    fn test_fas_zero_is_invalid() {
        assert_eq!(
            fas(&Noun::atom(0), &tree()),
            Err(NockError::InvalidAddress)
        );
        assert_eq!(
            fas(&Noun::atom(0), &Noun::atom(3)),
            Err(NockError::InvalidAddress)
        );
    }

    #[test]
    fn test_fas_cell_axis_is_invalid() {
        assert_eq!(
            fas(&Noun::slot(1), &tree()),
            Err(NockError::InvalidAddress)
        );
    }

    #[test]
    fn test_fas_into_atom_is_out_of_bounds() {
        assert_eq!(
            fas(&Noun::atom(2), &Noun::atom(42)),
            Err(NockError::AddressOutOfBounds)
        );
        assert_eq!(
            fas(&Noun::atom(8), &tree()),
            Err(NockError::AddressOutOfBounds)
        );
    }

    #[test]
    fn test_access_classification() {
        let of = |n: u64| Access::of(&BigUint::from(n));
        assert_eq!(of(0), Err(NockError::InvalidAddress));
        assert_eq!(of(1), Ok(Access::Root));
        assert_eq!(of(2), Ok(Access::Head));
        assert_eq!(of(3), Ok(Access::Tail));
        assert_eq!(of(6), Ok(Access::HeadOf));
        assert_eq!(of(7), Ok(Access::TailOf));
    }

    #[test]
    fn test_edit_replaces_subtree() {
        let tree = tree();
        let edited = edit(&Noun::atom(6), Noun::atom(99), &tree).unwrap();
        assert_eq!(edited.to_string(), "[[4 5] [99 [14 15]]]");
        let whole = edit(&Noun::atom(1), Noun::atom(0), &tree).unwrap();
        assert_eq!(whole, Noun::atom(0));
        // The target is untouched.
        assert_eq!(tree.to_string(), "[[4 5] [6 [14 15]]]");
    }

    #[test]
    fn test_edit_errors_match_fas() {
        assert_eq!(
            edit(&Noun::atom(0), Noun::atom(1), &tree()),
            Err(NockError::InvalidAddress)
        );
        assert_eq!(
            edit(&Noun::atom(2), Noun::atom(1), &Noun::atom(5)),
            Err(NockError::AddressOutOfBounds)
        );
    }
}
