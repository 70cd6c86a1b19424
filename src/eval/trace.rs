//! Observing reductions.
//!
//! The interpreter reports every `*` and `/` application to a [`Trace`] sink
//! together with the rule that matched and how many continuations are still
//! pending. Sinks only observe: nothing they do can change a product.

use std::fmt;

use crate::axis::Access;
use crate::noun::Noun;

/// One line of the Nock 4K rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// `/`, one of its five lines.
    Fas(Access),
    Distribute,
    Slot,
    Constant,
    Evaluate,
    CellTest,
    Increment,
    Equals,
    Branch,
    Compose,
    Push,
    Invoke,
    Edit,
    Hint,
}

impl Rule {
    /// Line number in the published Nock 4K rules.
    pub fn line(self) -> u8 {
        match self {
            Rule::Fas(Access::Root) => 12,
            Rule::Fas(Access::Head) => 13,
            Rule::Fas(Access::Tail) => 14,
            Rule::Fas(Access::HeadOf) => 15,
            Rule::Fas(Access::TailOf) => 16,
            Rule::Distribute => 19,
            Rule::Slot => 21,
            Rule::Constant => 22,
            Rule::Evaluate => 23,
            Rule::CellTest => 24,
            Rule::Increment => 25,
            Rule::Equals => 26,
            Rule::Branch => 28,
            Rule::Compose => 29,
            Rule::Push => 30,
            Rule::Invoke => 31,
            Rule::Edit => 32,
            Rule::Hint => 33,
        }
    }

    /// The pseudo-operator the rule belongs to.
    pub fn operator(self) -> char {
        match self {
            Rule::Fas(_) => '/',
            _ => '*',
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Rule::Fas(Access::Root) => "/[1 a]",
            Rule::Fas(Access::Head) => "/[2 a b]",
            Rule::Fas(Access::Tail) => "/[3 a b]",
            Rule::Fas(Access::HeadOf) => "/[(a + a) b]",
            Rule::Fas(Access::TailOf) => "/[(a + a + 1) b]",
            Rule::Distribute => "*[a [b c] d]",
            Rule::Slot => "*[a 0 b]",
            Rule::Constant => "*[a 1 b]",
            Rule::Evaluate => "*[a 2 b c]",
            Rule::CellTest => "*[a 3 b]",
            Rule::Increment => "*[a 4 b]",
            Rule::Equals => "*[a 5 b c]",
            Rule::Branch => "*[a 6 b c d]",
            Rule::Compose => "*[a 7 b c]",
            Rule::Push => "*[a 8 b c]",
            Rule::Invoke => "*[a 9 b c]",
            Rule::Edit => "*[a 10 [b c] d]",
            Rule::Hint => "*[a 10 b c]",
        }
    }

    pub fn reduction(self) -> &'static str {
        match self {
            Rule::Fas(Access::Root) => "a",
            Rule::Fas(Access::Head) => "a",
            Rule::Fas(Access::Tail) => "b",
            Rule::Fas(Access::HeadOf) => "/[2 /[a b]]",
            Rule::Fas(Access::TailOf) => "/[3 /[a b]]",
            Rule::Distribute => "[*[a b c] *[a d]]",
            Rule::Slot => "/[b a]",
            Rule::Constant => "b",
            Rule::Evaluate => "*[*[a b] *[a c]]",
            Rule::CellTest => "?*[a b]",
            Rule::Increment => "+*[a b]",
            Rule::Equals => "=[*[a b] *[a c]]",
            Rule::Branch => "*[a 2 [0 1] 2 [1 c d] [1 0] 2 [1 2 3] [1 0] 4 4 b]",
            Rule::Compose => "*[*[a b] c]",
            Rule::Push => "*[[*[a b] a] c]",
            Rule::Invoke => "*[*[a c] 2 [0 1] 0 b]",
            Rule::Edit => "*[#[b *[a c] a] d]",
            Rule::Hint => "*[a c]",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<2} ::    {:<18}{}",
            self.line(),
            self.pattern(),
            self.reduction()
        )
    }
}

/// One `*` or `/` application, reported on entry.
#[derive(Clone, Copy, Debug)]
pub struct Step<'a> {
    /// Continuations pending when the application started.
    pub depth: usize,
    pub rule: Rule,
    /// `[subject formula]` for `*`, `[axis noun]` for `/`.
    pub input: &'a Noun,
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rule.operator(), self.input)
    }
}

/// A sink for reduction events.
pub trait Trace {
    /// Whether events are wanted at all. The interpreter skips assembling
    /// step inputs when this is false.
    fn enabled(&self) -> bool {
        true
    }

    /// A reduction begins.
    fn step(&mut self, step: &Step<'_>);

    /// The reduction entered at `depth` produced `product`; depth `0` is the
    /// final product.
    fn product(&mut self, _depth: usize, _product: &Noun) {}
}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn step(&mut self, step: &Step<'_>) {
        (**self).step(step)
    }

    fn product(&mut self, depth: usize, product: &Noun) {
        (**self).product(depth, product)
    }
}

/// The default sink: reports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn enabled(&self) -> bool {
        false
    }

    fn step(&mut self, _step: &Step<'_>) {}
}

/// A recorded reduction event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Step {
        depth: usize,
        rule: Rule,
        input: Noun,
    },
    Product {
        depth: usize,
        product: Noun,
    },
}

/// Records every event for later inspection or rendering.
#[derive(Clone, Debug, Default)]
pub struct Derivation {
    events: Vec<Event>,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Rules in the order they fired.
    pub fn rules(&self) -> Vec<Rule> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Step { rule, .. } => Some(*rule),
                Event::Product { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Indented derivation: each application followed by the rule it used,
    /// each returned value marked with `=`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            match event {
                Event::Step { depth, rule, input } => {
                    let pad = " ".repeat(*depth);
                    out.push_str(&format!("{}{}{}\n", pad, rule.operator(), input));
                    out.push_str(&format!("{} <- {}\n", pad, rule));
                }
                Event::Product { depth, product } => {
                    out.push_str(&format!("{}= {}\n", " ".repeat(*depth), product));
                }
            }
        }
        out
    }
}

impl Trace for Derivation {
    fn step(&mut self, step: &Step<'_>) {
        self.events.push(Event::Step {
            depth: step.depth,
            rule: step.rule,
            input: step.input.clone(),
        });
    }

    fn product(&mut self, depth: usize, product: &Noun) {
        self.events.push(Event::Product {
            depth,
            product: product.clone(),
        });
    }
}

/// Narrates reductions through the `log` facade under `nock::trace`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl LogTrace {
    pub const TARGET: &'static str = "nock::trace";
}

impl Trace for LogTrace {
    fn enabled(&self) -> bool {
        log::log_enabled!(target: LogTrace::TARGET, log::Level::Debug)
    }

    fn step(&mut self, step: &Step<'_>) {
        let pad = " ".repeat(step.depth);
        log::debug!(target: LogTrace::TARGET, "{}{}", pad, step);
        log::debug!(target: LogTrace::TARGET, "{} <- {}", pad, step.rule);
    }

    fn product(&mut self, depth: usize, product: &Noun) {
        log::debug!(target: LogTrace::TARGET, "{}= {}", " ".repeat(depth), product);
    }
}
