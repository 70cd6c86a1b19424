use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(
    name = "nock",
    version,
    about = "Nock reference evaluator: nouns in, nouns out."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Reduce an expression; a bare noun is reduced with `*`
    Eval {
        /// Expression in bracket notation, e.g. '[42 [4 0 1]]'
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        expr: Option<String>,
        /// Read the expression from a file instead
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Print the derivation to stderr
        #[arg(long)]
        trace: bool,
        /// Abort after this many reductions
        #[arg(long, value_name = "N")]
        step_limit: Option<u64>,
        /// Print the product as [a b c] instead of [a [b c]]
        #[arg(long)]
        condensed: bool,
    },
    /// Interactive prompt (the default)
    Repl,
}

fn main() {
    let cli = Cli::parse();
    let logging = cli::Logging::init();

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval {
            expr,
            file,
            trace,
            step_limit,
            condensed,
        } => cli::eval::cmd_eval(cli::eval::EvalArgs {
            expr,
            file,
            trace,
            step_limit,
            condensed,
        }),
        Command::Repl => cli::repl::cmd_repl(logging),
    }
}
