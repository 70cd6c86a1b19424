use std::path::PathBuf;
use std::process;

use nock::diagnostic::Diagnostic;
use nock::eval::{Derivation, Interpreter};

use super::load_config;

pub struct EvalArgs {
    pub expr: Option<String>,
    pub file: Option<PathBuf>,
    pub trace: bool,
    pub step_limit: Option<u64>,
    pub condensed: bool,
}

pub fn cmd_eval(args: EvalArgs) {
    let config = load_config();

    let (filename, source) = match (&args.file, args.expr) {
        (Some(path), _) => match std::fs::read_to_string(path) {
            Ok(source) => (path.display().to_string(), source),
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        (None, Some(expr)) => ("<expr>".to_string(), expr),
        (None, None) => {
            eprintln!("error: nothing to evaluate; pass an expression or --file");
            process::exit(1);
        }
    };

    let expr = match nock::parse_source(&source, &filename) {
        Ok(expr) => expr,
        Err(_) => process::exit(1),
    };

    let step_limit = args.step_limit.or(config.step_limit);
    let result = if args.trace || config.trace {
        let mut interpreter = Interpreter::with_trace(Derivation::new());
        interpreter.set_step_limit(step_limit);
        let result = expr.run(&mut interpreter);
        eprint!("{}", interpreter.trace().render());
        result
    } else {
        let mut interpreter = Interpreter::new();
        interpreter.set_step_limit(step_limit);
        expr.run(&mut interpreter)
    };

    match result {
        Ok(product) if args.condensed => println!("{:#}", product),
        Ok(product) => println!("{}", product),
        Err(err) => {
            Diagnostic::from(err).render(&filename, &source);
            process::exit(1);
        }
    }
}
