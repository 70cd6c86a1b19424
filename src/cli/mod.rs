pub mod eval;
pub mod repl;

use std::io::Write;
use std::process;

use log::LevelFilter;
use nock::config::Config;
use nock::eval::LogTrace;

/// Load the nearest nock.toml, exiting on a malformed file.
pub fn load_config() -> Config {
    let dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    match Config::discover(&dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e.message);
            for note in &e.notes {
                eprintln!("  note: {}", note);
            }
            process::exit(1);
        }
    }
}

/// The installed logger, with `nock::trace` narration switchable at runtime.
///
/// `RUST_LOG` (default `warn`) sets the base level. The logger itself always
/// admits `nock::trace` at debug; whether those records are produced is
/// decided by the global max level.
#[derive(Clone, Copy, Debug)]
pub struct Logging {
    base: LevelFilter,
}

impl Logging {
    pub fn init() -> Self {
        let env = || env_logger::Env::default().default_filter_or("warn");
        let base = env_logger::Builder::from_env(env()).build().filter();

        let logger = env_logger::Builder::from_env(env())
            .filter_module(LogTrace::TARGET, LevelFilter::Debug)
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .build();
        if log::set_boxed_logger(Box::new(logger)).is_err() {
            eprintln!("warning: a logger is already installed");
        }
        log::set_max_level(base);
        Self { base }
    }

    /// Turn reduction narration on or off.
    pub fn set_debug(&self, on: bool) {
        let level = if on {
            self.base.max(LevelFilter::Debug)
        } else {
            self.base
        };
        log::set_max_level(level);
    }
}
