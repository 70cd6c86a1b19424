//! The Nock interpreter.
//!
//! `*[subject formula]` is reduced on an explicit continuation stack rather
//! than on the native call stack:
//!
//! - a sub-evaluation whose product is still needed pushes a [`Frame`] and
//!   continues with the sub-formula;
//! - a rule whose result *is* another reduction (2, 6, 7, 8, 9, 10) replaces
//!   the current task without pushing anything.
//!
//! Loops written with `2` or `9` therefore run in constant stack space, and
//! deeply nested formulas only cost heap.

pub mod formula;
pub mod trace;


use crate::axis::{self, Access};
use crate::error::{NockError, Result};
use crate::noun::Noun;

pub use formula::Formula;
pub use trace::{Derivation, Event, LogTrace, NoTrace, Rule, Step, Trace};

/// `?noun`: `0` for a cell, `1` for an atom.
pub fn wut(noun: &Noun) -> Noun {
    Noun::loobean(noun.is_cell())
}

/// `+noun`: increment an atom.
pub fn lus(noun: &Noun) -> Result<Noun> {
    match noun {
        Noun::Atom(value) => Ok(Noun::Atom(value + 1u32)),
        Noun::Cell(_) => Err(NockError::NotAnAtom),
    }
}

/// `=[a b]`: `0` if `a` and `b` are the same noun, else `1`.
pub fn tis(noun: &Noun) -> Result<Noun> {
    noun.as_cell()
        .map(|cell| Noun::loobean(cell.head() == cell.tail()))
        .ok_or(NockError::NotACell)
}

/// `/[axis noun]`, untraced.
pub fn fas(axis: &Noun, noun: &Noun) -> Result<Noun> {
    axis::fas(axis, noun)
}

/// `*[subject formula]`, untraced and unbounded.
pub fn tar(noun: &Noun) -> Result<Noun> {
    Interpreter::new().tar(noun)
}

/// `*[subject formula]` with the halves given separately.
pub fn nock(subject: Noun, formula: Noun) -> Result<Noun> {
    Interpreter::new().reduce(subject, formula)
}

enum Task {
    Reduce { subject: Noun, formula: Noun },
    Return(Noun),
}

/// What to do with the product of a pending sub-evaluation.
enum Frame {
    /// Distribute: head done, reduce the tail formula next.
    DistributeTail { subject: Noun, formula: Noun },
    DistributeDone { head: Noun },
    /// Rule 2: new subject known, compute the formula.
    EvaluateFormula { subject: Noun, formula: Noun },
    /// Rule 2: both known, the product is the formula.
    EvaluateApply { subject: Noun },
    CellTest,
    Increment,
    EqualsRight { subject: Noun, formula: Noun },
    EqualsDone { left: Noun },
    Compose { then: Noun },
    Push { subject: Noun, then: Noun },
    Invoke { axis: Noun },
    Edit { subject: Noun, axis: Noun, then: Noun },
}

/// Reduces nouns, reporting to a trace sink and optionally enforcing a step
/// budget.
pub struct Interpreter<T: Trace = NoTrace> {
    trace: T,
    step_limit: Option<u64>,
    steps: u64,
}

impl Interpreter<NoTrace> {
    pub fn new() -> Self {
        Self::with_trace(NoTrace)
    }
}

impl Default for Interpreter<NoTrace> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Trace> Interpreter<T> {
    pub fn with_trace(trace: T) -> Self {
        Self {
            trace,
            step_limit: None,
            steps: 0,
        }
    }

    /// Abort any single evaluation that needs more than `limit` reductions.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn set_step_limit(&mut self, limit: Option<u64>) {
        self.step_limit = limit;
    }

    pub fn step_limit(&self) -> Option<u64> {
        self.step_limit
    }

    /// Reductions performed by the most recent evaluation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    pub fn into_trace(self) -> T {
        self.trace
    }

    /// `*[subject formula]`. An atom has no formula and matches no rule.
    pub fn tar(&mut self, noun: &Noun) -> Result<Noun> {
        let cell = noun.as_cell().ok_or(NockError::IllFormedFormula)?;
        self.reduce(cell.head().clone(), cell.tail().clone())
    }

    pub fn reduce(&mut self, subject: Noun, formula: Noun) -> Result<Noun> {
        self.steps = 0;
        let result = self.run(subject, formula);
        match &result {
            Ok(_) => log::debug!(target: "nock::eval", "reduced in {} steps", self.steps),
            Err(err) => log::debug!(
                target: "nock::eval",
                "crashed after {} steps: {}",
                self.steps,
                err
            ),
        }
        result
    }

    /// `/[axis noun]`, reported to the trace sink.
    pub fn fas(&mut self, axis: &Noun, noun: &Noun) -> Result<Noun> {
        self.access(axis, noun, 0)
    }

    fn run(&mut self, subject: Noun, formula: Noun) -> Result<Noun> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut task = Task::Reduce { subject, formula };
        loop {
            task = match task {
                Task::Reduce { subject, formula } => self.step(subject, formula, &mut stack)?,
                Task::Return(product) => {
                    if self.trace.enabled() {
                        self.trace.product(stack.len(), &product);
                    }
                    match stack.pop() {
                        None => return Ok(product),
                        Some(frame) => self.resume(frame, product, &mut stack)?,
                    }
                }
            };
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => Err(NockError::EvaluationAborted { limit }),
            _ => Ok(()),
        }
    }

    fn step(&mut self, subject: Noun, formula: Noun, stack: &mut Vec<Frame>) -> Result<Task> {
        self.tick()?;
        let decoded = Formula::decode(&formula)?;

        if self.trace.enabled() {
            let input = Noun::cell(subject.clone(), formula);
            self.trace.step(&Step {
                depth: stack.len(),
                rule: decoded.rule(),
                input: &input,
            });
        }

        let task = match decoded {
            Formula::Distribute { head, tail } => {
                stack.push(Frame::DistributeTail {
                    subject: subject.clone(),
                    formula: tail,
                });
                Task::Reduce {
                    subject,
                    formula: head,
                }
            }
            Formula::Slot { axis } => Task::Return(self.access(&axis, &subject, stack.len())?),
            Formula::Constant { value } => Task::Return(value),
            Formula::Evaluate {
                subject: next_subject,
                formula: next_formula,
            } => {
                stack.push(Frame::EvaluateFormula {
                    subject: subject.clone(),
                    formula: next_formula,
                });
                Task::Reduce {
                    subject,
                    formula: next_subject,
                }
            }
            Formula::CellTest { formula } => {
                stack.push(Frame::CellTest);
                Task::Reduce { subject, formula }
            }
            Formula::Increment { formula } => {
                stack.push(Frame::Increment);
                Task::Reduce { subject, formula }
            }
            Formula::Equals { left, right } => {
                stack.push(Frame::EqualsRight {
                    subject: subject.clone(),
                    formula: right,
                });
                Task::Reduce {
                    subject,
                    formula: left,
                }
            }
            Formula::Branch { test, yes, no } => Task::Reduce {
                subject,
                formula: formula::branch_rewrite(test, yes, no),
            },
            Formula::Compose { first, then } => {
                stack.push(Frame::Compose { then });
                Task::Reduce {
                    subject,
                    formula: first,
                }
            }
            Formula::Push { value, then } => {
                stack.push(Frame::Push {
                    subject: subject.clone(),
                    then,
                });
                Task::Reduce {
                    subject,
                    formula: value,
                }
            }
            Formula::Invoke { axis, core } => {
                stack.push(Frame::Invoke { axis });
                Task::Reduce {
                    subject,
                    formula: core,
                }
            }
            Formula::Edit { axis, value, then } => {
                stack.push(Frame::Edit {
                    subject: subject.clone(),
                    axis,
                    then,
                });
                Task::Reduce {
                    subject,
                    formula: value,
                }
            }
            Formula::Hint { formula, .. } => Task::Reduce { subject, formula },
        };
        Ok(task)
    }

    fn resume(&mut self, frame: Frame, product: Noun, stack: &mut Vec<Frame>) -> Result<Task> {
        let task = match frame {
            Frame::DistributeTail { subject, formula } => {
                stack.push(Frame::DistributeDone { head: product });
                Task::Reduce { subject, formula }
            }
            Frame::DistributeDone { head } => Task::Return(Noun::cell(head, product)),
            Frame::EvaluateFormula { subject, formula } => {
                stack.push(Frame::EvaluateApply { subject: product });
                Task::Reduce { subject, formula }
            }
            Frame::EvaluateApply { subject } => Task::Reduce {
                subject,
                formula: product,
            },
            Frame::CellTest => Task::Return(wut(&product)),
            Frame::Increment => Task::Return(lus(&product)?),
            Frame::EqualsRight { subject, formula } => {
                stack.push(Frame::EqualsDone { left: product });
                Task::Reduce { subject, formula }
            }
            Frame::EqualsDone { left } => Task::Return(Noun::loobean(left == product)),
            Frame::Compose { then } => Task::Reduce {
                subject: product,
                formula: then,
            },
            Frame::Push { subject, then } => Task::Reduce {
                subject: Noun::cell(product, subject),
                formula: then,
            },
            Frame::Invoke { axis } => {
                let formula = self.access(&axis, &product, stack.len())?;
                Task::Reduce {
                    subject: product,
                    formula,
                }
            }
            Frame::Edit {
                subject,
                axis,
                then,
            } => Task::Reduce {
                subject: axis::edit(&axis, product, &subject)?,
                formula: then,
            },
        };
        Ok(task)
    }

    fn access(&mut self, axis: &Noun, noun: &Noun, depth: usize) -> Result<Noun> {
        if self.trace.enabled() {
            let access = match axis {
                Noun::Atom(value) => Access::of(value)?,
                Noun::Cell(_) => return Err(NockError::InvalidAddress),
            };
            let input = Noun::cell(axis.clone(), noun.clone());
            self.trace.step(&Step {
                depth,
                rule: Rule::Fas(access),
                input: &input,
            });
        }
        axis::fas(axis, noun)
    }
}
