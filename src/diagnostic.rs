use crate::error::NockError;
use crate::syntax::span::{Span, Spanned};

/// A notation or evaluation diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    fn report<'a>(
        &'a self,
        filename: &'a str,
        color: bool,
    ) -> ariadne::Report<'a, (&'a str, std::ops::Range<usize>)> {
        use ariadne::{Color, Config, Label, Report, ReportKind};

        let mut report = Report::build(ReportKind::Error, filename, self.span.start as usize)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.start as usize..self.span.end as usize))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish()
    }

    /// Render the diagnostic to stderr using ariadne.
    pub fn render(&self, filename: &str, source: &str) {
        use ariadne::Source;

        if let Err(err) = self
            .report(filename, true)
            .eprint((filename, Source::from(source)))
        {
            log::warn!("could not render diagnostic: {}", err);
        }
    }

    /// Render without colors, for logs and tests.
    pub fn render_plain(&self, filename: &str, source: &str) -> String {
        use ariadne::Source;

        let mut buf = Vec::new();
        if self
            .report(filename, false)
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return self.message.clone();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl From<Spanned<NockError>> for Diagnostic {
    fn from(error: Spanned<NockError>) -> Self {
        let diagnostic = Diagnostic::error(error.node.to_string(), error.span);
        match error.node {
            NockError::InvalidAddress => {
                diagnostic.with_help("axes start at 1; 1 is the whole noun".to_string())
            }
            NockError::AddressOutOfBounds => diagnostic
                .with_note("the path ran into an atom before reaching the axis".to_string()),
            NockError::IllFormedFormula => diagnostic.with_note(
                "a formula is a cell [op arg] with op in 0..=10, or a pair of formulas".to_string(),
            ),
            NockError::NotACell => {
                diagnostic.with_help("this operator takes a cell [a b]".to_string())
            }
            NockError::EvaluationAborted { .. } => diagnostic
                .with_help("raise the budget with --step-limit or [eval] step_limit".to_string()),
            NockError::InvalidAtom | NockError::NotAnAtom => diagnostic,
        }
    }
}

/// Render a list of diagnostics.
pub fn render_diagnostics(diagnostics: &[Diagnostic], filename: &str, source: &str) {
    for diag in diagnostics {
        diag.render(filename, source);
    }
}
