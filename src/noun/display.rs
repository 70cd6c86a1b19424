use std::fmt;

use super::Noun;

/// Canonical form brackets every cell: `[4 [0 1]]`.
/// The alternate form (`{:#}`) drops the brackets a right-nested tail
/// does not need: `[4 0 1]`.
impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let condensed = f.alternate();
        write_noun(f, self, condensed)
    }
}

impl fmt::Debug for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_noun(f, self, false)
    }
}

enum Pending<'a> {
    /// A noun in element position: a cell opens its own bracket.
    Element(&'a Noun),
    /// The tail of a cell already opened.
    Tail(&'a Noun),
    Text(&'static str),
}

/// Renders on an explicit work stack, so nesting depth on either side costs
/// heap rather than native stack.
fn write_noun(f: &mut fmt::Formatter<'_>, noun: &Noun, condensed: bool) -> fmt::Result {
    let mut pending = vec![Pending::Element(noun)];
    while let Some(next) = pending.pop() {
        match next {
            Pending::Text(text) => f.write_str(text)?,
            Pending::Element(Noun::Atom(value)) | Pending::Tail(Noun::Atom(value)) => {
                write!(f, "{}", value)?
            }
            Pending::Tail(Noun::Cell(cell)) if condensed => {
                pending.push(Pending::Tail(cell.tail()));
                pending.push(Pending::Text(" "));
                pending.push(Pending::Element(cell.head()));
            }
            Pending::Element(Noun::Cell(cell)) | Pending::Tail(Noun::Cell(cell)) => {
                f.write_str("[")?;
                pending.push(Pending::Text("]"));
                pending.push(Pending::Tail(cell.tail()));
                pending.push(Pending::Text(" "));
                pending.push(Pending::Element(cell.head()));
            }
        }
    }
    Ok(())
}
