use num_bigint::BigUint;

/// All lexemes of bracket notation.
#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    LBracket, // [
    RBracket, // ]

    // Pseudo-operators
    Tar, // *
    Wut, // ?
    Lus, // +
    Tis, // =
    Fas, // /

    Atom(BigUint),

    Eof,
}

impl Lexeme {
    pub fn description(&self) -> &'static str {
        match self {
            Lexeme::LBracket => "'['",
            Lexeme::RBracket => "']'",
            Lexeme::Tar => "'*'",
            Lexeme::Wut => "'?'",
            Lexeme::Lus => "'+'",
            Lexeme::Tis => "'='",
            Lexeme::Fas => "'/'",
            Lexeme::Atom(_) => "atom",
            Lexeme::Eof => "end of input",
        }
    }
}
