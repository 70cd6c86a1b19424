use nock::eval::{Derivation, Interpreter, Rule};
use nock::{fas, nock, tar, NockError, Noun};

fn noun(text: &str) -> Noun {
    text.parse()
        .unwrap_or_else(|errs| panic!("bad fixture {:?}: {:?}", text, errs))
}

/// A spread of atoms and cells, including shared and deep ones.
fn samples() -> Vec<Noun> {
    let mut out: Vec<Noun> = [
        "0",
        "1",
        "42",
        "18446744073709551616",
        "[1 2]",
        "[[4 5] [6 14 15]]",
        "[42 [4 0 1]]",
        "[[1 2] [3 4] [5 6] 7]",
    ]
    .iter()
    .map(|text| noun(text))
    .collect();
    let shared = noun("[9 9]");
    out.push(Noun::cell(shared.clone(), shared));
    out.push(Noun::tuple((0..1_000u64).map(Noun::atom)).unwrap());
    out
}

// ── Structural access ──

#[test]
fn test_fas_one_is_identity() {
    for n in samples() {
        assert_eq!(fas(&Noun::atom(1), &n), Ok(n.clone()));
    }
}

#[test]
fn test_fas_two_and_three_take_halves() {
    let nouns = samples();
    for h in &nouns {
        for t in &nouns {
            let pair = Noun::cell(h.clone(), t.clone());
            assert_eq!(fas(&Noun::atom(2), &pair).as_ref(), Ok(h));
            assert_eq!(fas(&Noun::atom(3), &pair).as_ref(), Ok(t));
        }
    }
}

#[test]
fn test_fas_zero_is_invalid_everywhere() {
    for n in samples() {
        assert_eq!(fas(&Noun::atom(0), &n), Err(NockError::InvalidAddress));
    }
}

#[test]
fn test_fas_into_atom_is_out_of_bounds() {
    assert_eq!(
        fas(&Noun::atom(2), &Noun::atom(42)),
        Err(NockError::AddressOutOfBounds)
    );
    assert_eq!(
        fas(&Noun::atom(12), &noun("[[4 5] [6 14 15]]")),
        Err(NockError::AddressOutOfBounds)
    );
}

#[test]
fn test_fas_tree() {
    let tree = noun("[[4 5] [6 14 15]]");
    for (axis, expected) in [
        (1, "[[4 5] [6 14 15]]"),
        (2, "[4 5]"),
        (3, "[6 14 15]"),
        (4, "4"),
        (5, "5"),
        (6, "6"),
        (7, "[14 15]"),
        (14, "14"),
        (15, "15"),
    ] {
        assert_eq!(fas(&Noun::atom(axis), &tree), Ok(noun(expected)), "/{}", axis);
    }
}

// ── Reduction properties ──

#[test]
fn test_increment_of_constant() {
    for a in [0u64, 1, 41, u64::MAX] {
        let formula = Noun::increment(Noun::constant(Noun::atom(a)));
        let expected = Noun::from(num_bigint::BigUint::from(a) + 1u32);
        for subject in samples() {
            assert_eq!(nock(subject, formula.clone()), Ok(expected.clone()));
        }
    }
}

#[test]
fn test_constant_reproduces_operand() {
    for n in samples() {
        assert_eq!(nock(n.clone(), Noun::constant(n.clone())), Ok(n));
    }
}

#[test]
fn test_slot_rule_is_fas() {
    let subject = noun("[[4 5] [6 14 15]]");
    for axis in 0..20u64 {
        assert_eq!(
            nock(subject.clone(), Noun::slot(axis)),
            fas(&Noun::atom(axis), &subject),
            "axis {}",
            axis
        );
    }
    for axis in ["[1 2]", "[0 1]", "[[4 5] 6]"] {
        let axis = noun(axis);
        assert_eq!(
            nock(subject.clone(), Noun::cell(Noun::atom(0), axis.clone())),
            fas(&axis, &subject),
            "axis {}",
            axis
        );
    }
}

#[test]
fn test_autocons_distributes() {
    let subject = noun("[[132 19] 7]");
    let formulas = [
        noun("[0 2]"),
        noun("[4 0 3]"),
        noun("[1 5 6]"),
        noun("[3 0 1]"),
    ];
    for b in &formulas {
        for c in &formulas {
            let pair = nock(subject.clone(), Noun::cell(b.clone(), c.clone())).unwrap();
            let expected = Noun::cell(
                nock(subject.clone(), b.clone()).unwrap(),
                nock(subject.clone(), c.clone()).unwrap(),
            );
            assert_eq!(pair, expected);
        }
    }
}

#[test]
fn test_cell_test_both_branches() {
    assert_eq!(tar(&noun("[[1 2] [3 0 1]]")), Ok(Noun::yes()));
    assert_eq!(tar(&noun("[[1 2] [3 0 2]]")), Ok(Noun::no()));
    assert_eq!(tar(&noun("[5 [3 1 [6 7]]]")), Ok(Noun::yes()));
}

#[test]
fn test_equality_is_reflexive_and_symmetric() {
    let subject = noun("[[1 2] [1 2] 3]");
    let formulas = [noun("[0 2]"), noun("[0 6]"), noun("[0 7]"), noun("[1 1 2]")];
    for b in &formulas {
        assert_eq!(
            nock(subject.clone(), Noun::equals(b.clone(), b.clone())),
            Ok(Noun::yes())
        );
        for c in &formulas {
            assert_eq!(
                nock(subject.clone(), Noun::equals(b.clone(), c.clone())),
                nock(subject.clone(), Noun::equals(c.clone(), b.clone()))
            );
        }
    }
}

#[test]
fn test_concrete_scenarios() {
    assert_eq!(tar(&noun("[42 [4 [0 1]]]")), Ok(Noun::atom(43)));
    assert_eq!(
        tar(&noun("[42 [6 [1 0] [4 [0 1]] [1 233]]]")),
        Ok(Noun::atom(43))
    );
    assert_eq!(
        tar(&noun("[42 [6 [1 1] [4 [0 1]] [1 233]]]")),
        Ok(Noun::atom(233))
    );
}

#[test]
fn test_failure_scenarios() {
    assert_eq!(tar(&noun("[42 [4 [1 [0 0]]]]")), Err(NockError::NotAnAtom));
    assert_eq!(tar(&noun("[42 [99 0]]")), Err(NockError::IllFormedFormula));
}

#[test]
fn test_derivation_examples() {
    let cases = [
        ("[42 [[4 0 1] [3 0 1]]]", "[43 1]"),
        ("[2 0 1]", "2"),
        ("[[[4 5] [6 14 15]] [0 7]]", "[14 15]"),
        ("[42 1 5]", "5"),
        ("[42 [1 153 218]]", "[153 218]"),
        ("[77 [2 [1 42] [1 1 153 218]]]", "[153 218]"),
        ("[57 [0 1]]", "57"),
        ("[[132 19] [0 3]]", "19"),
        ("[[42 43] [3 0 1]]", "0"),
        ("[42 [3 0 1]]", "1"),
        ("[57 [4 0 1]]", "58"),
        ("[42 [7 [4 0 1] [4 0 1]]]", "44"),
        ("[42 [8 [4 0 1] [0 1]]]", "[43 42]"),
        ("[42 [8 [4 0 1] [4 0 3]]]", "43"),
        ("[[132 19] [10 37 [4 0 3]]]", "20"),
    ];
    for (input, expected) in cases {
        assert_eq!(tar(&noun(input)), Ok(noun(expected)), "*{}", input);
    }
}

// ── Deep programs ──

/// A decrement written in Nock: counts up from 0 until the successor of the
/// counter equals the argument.
fn decrement(n: u64) -> (Noun, Noun) {
    let formula = noun(
        "[8 [1 0] 8 [1 6 [5 [0 7] 4 0 6] [0 6] 9 2 [0 2] [4 0 6] 0 7] 9 2 0 1]",
    );
    (Noun::atom(n), formula)
}

#[test]
fn test_decrement_loop() {
    for n in [1u64, 2, 10, 5_000] {
        let (subject, formula) = decrement(n);
        assert_eq!(nock(subject, formula), Ok(Noun::atom(n - 1)), "dec {}", n);
    }
}

#[test]
fn test_decrement_of_zero_runs_out_of_budget() {
    let (subject, formula) = decrement(0);
    let mut interpreter = Interpreter::new().with_step_limit(10_000);
    assert_eq!(
        interpreter.reduce(subject, formula),
        Err(NockError::EvaluationAborted { limit: 10_000 })
    );
}

#[test]
fn test_tracing_never_changes_products() {
    let programs = [
        "[42 [6 [1 1] [4 [0 1]] [1 233]]]",
        "[[[4 5] [6 14 15]] [10 [7 [1 0]] [0 1]]]",
        "[7 [8 [1 0] 8 [1 6 [5 [0 7] 4 0 6] [0 6] 9 2 [0 2] [4 0 6] 0 7] 9 2 0 1]]",
        "[42 [99 0]]",
    ];
    for text in programs {
        let program = noun(text);
        let mut traced = Interpreter::with_trace(Derivation::new());
        let product = traced.tar(&program);
        assert_eq!(product, tar(&program), "{}", text);
        if product.is_ok() {
            assert!(!traced.trace().events().is_empty());
        }
    }
}

#[test]
fn test_loop_is_traced_through_invoke() {
    let (subject, formula) = decrement(3);
    let mut interpreter = Interpreter::with_trace(Derivation::new());
    interpreter.reduce(subject, formula).unwrap();
    let rules = interpreter.trace().rules();
    assert_eq!(rules.iter().filter(|r| **r == Rule::Invoke).count(), 3);
    assert!(rules.contains(&Rule::Branch));
}
