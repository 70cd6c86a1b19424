use std::io::{self, BufRead, Write};

use nock::diagnostic::{render_diagnostics, Diagnostic};
use nock::eval::{Interpreter, LogTrace};
use nock::syntax;

use super::{load_config, Logging};

const BANNER: &str = "Welcome to Nock! (`:q` or ^D to quit; `:debug on` to narrate reductions)";

/// What the prompt should do after a line.
#[derive(Debug)]
pub enum Reply {
    Nothing,
    Quit,
    Debug(bool),
    Output(String),
    Failed(Vec<Diagnostic>),
}

/// Interpreter state kept across lines.
pub struct Session {
    interpreter: Interpreter<LogTrace>,
    debug: bool,
}

impl Session {
    pub fn new(step_limit: Option<u64>, debug: bool) -> Self {
        let mut interpreter = Interpreter::with_trace(LogTrace);
        interpreter.set_step_limit(step_limit);
        Self { interpreter, debug }
    }

    /// Operators in the line are applied; a bare noun is echoed in canonical
    /// form.
    pub fn handle(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Nothing;
        }
        if line == ":q" {
            return Reply::Quit;
        }
        if let Some(arg) = line.strip_prefix(":debug") {
            self.debug = match arg.trim() {
                "on" => true,
                "off" => false,
                _ => !self.debug,
            };
            return Reply::Debug(self.debug);
        }

        let expr = match syntax::parse(line) {
            Ok(expr) => expr,
            Err(diagnostics) => return Reply::Failed(diagnostics),
        };
        match expr.reduce(&mut self.interpreter) {
            Ok(product) => Reply::Output(product.to_string()),
            Err(err) => Reply::Failed(vec![Diagnostic::from(err)]),
        }
    }
}

pub fn cmd_repl(logging: Logging) {
    let config = load_config();
    let mut session = Session::new(config.step_limit, config.trace);
    logging.set_debug(config.trace);

    println!("{}", BANNER);
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("{}", config.prompt);
        if io::stdout().flush().is_err() {
            break;
        }
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }

        match session.handle(&line) {
            Reply::Nothing => {}
            Reply::Quit => break,
            Reply::Debug(on) => {
                logging.set_debug(on);
                println!("debug {}", if on { "on" } else { "off" });
            }
            Reply::Output(text) => {
                println!("{}", text);
                println!();
            }
            Reply::Failed(diagnostics) => {
                render_diagnostics(&diagnostics, "<repl>", line.trim());
            }
        }
    }

    println!("Good-bye!");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(session: &mut Session, line: &str) -> String {
        match session.handle(line) {
            Reply::Output(text) => text,
            other => panic!("expected output for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_commands() {
        let mut session = Session::new(None, false);
        assert!(matches!(session.handle("   "), Reply::Nothing));
        assert!(matches!(session.handle(":q"), Reply::Quit));
        assert!(matches!(session.handle(":debug on"), Reply::Debug(true)));
        assert!(matches!(session.handle(":debug"), Reply::Debug(false)));
        assert!(matches!(session.handle(":debug"), Reply::Debug(true)));
        assert!(matches!(session.handle(":debug off"), Reply::Debug(false)));
    }

    #[test]
    fn test_bare_noun_is_echoed() {
        let mut session = Session::new(None, false);
        assert_eq!(output(&mut session, "[42 4 0 1]"), "[42 [4 [0 1]]]");
    }

    #[test]
    fn test_operators_are_applied() {
        let mut session = Session::new(None, false);
        assert_eq!(output(&mut session, "*[42 4 0 1]\n"), "43");
        assert_eq!(output(&mut session, "/[3 [4 5]]"), "5");
        assert_eq!(output(&mut session, "[?1 =[2 2]]"), "[1 0]");
    }

    #[test]
    fn test_failures_are_diagnostics() {
        let mut session = Session::new(Some(10), false);
        match session.handle("*[[2 [0 1] [0 1]] [2 [0 1] [0 1]]]") {
            Reply::Failed(diags) => {
                assert_eq!(diags.len(), 1);
                assert!(diags[0].message.contains("aborted"), "{}", diags[0].message);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(matches!(session.handle("[1"), Reply::Failed(_)));
        // The session survives a failure.
        assert_eq!(output(&mut session, "+1"), "2");
    }
}
