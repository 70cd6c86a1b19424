use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::syntax::span::Span;

/// Settings from an optional `nock.toml`.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// `[eval] step_limit`: abort reductions that take more steps.
    pub step_limit: Option<u64>,
    /// `[eval] trace`: print derivations by default.
    pub trace: bool,
    /// `[repl] prompt`
    pub prompt: String,
    /// The file the settings came from, if any.
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: None,
            trace: false,
            prompt: "-> ".to_string(),
            path: None,
        }
    }
}

fn config_error(message: String) -> Diagnostic {
    Diagnostic::error(message, Span::dummy())
}

/// Drop a trailing `# comment` from an unquoted value.
fn strip_comment(value: &str) -> &str {
    match value.split_once('#') {
        Some((before, _)) => before.trim(),
        None => value,
    }
}

/// Parse a TOML basic string: `"-> "` → `-> `.
fn parse_string(value: &str) -> Option<String> {
    let rest = value.strip_prefix('"')?;
    let end = rest.find('"')?;
    let after = rest[end + 1..].trim();
    if !after.is_empty() && !after.starts_with('#') {
        return None;
    }
    Some(rest[..end].to_string())
}

impl Config {
    pub const FILE_NAME: &'static str = "nock.toml";

    /// Load settings from a nock.toml file.
    pub fn load(toml_path: &Path) -> Result<Config, Diagnostic> {
        let content = std::fs::read_to_string(toml_path).map_err(|e| {
            config_error(format!("cannot read '{}': {}", toml_path.display(), e))
        })?;
        let mut config = Config::parse(&content).map_err(|diag| {
            diag.with_note(format!("in '{}'", toml_path.display()))
        })?;
        config.path = Some(toml_path.to_path_buf());
        Ok(config)
    }

    /// Section-aware minimal TOML parsing. Unknown sections and keys are
    /// ignored.
    pub fn parse(content: &str) -> Result<Config, Diagnostic> {
        let mut config = Config::default();
        let mut current_section = String::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                continue;
            };
            let key = key.trim().trim_matches('"');
            let value = value.trim();

            match (current_section.as_str(), key) {
                ("eval", "step_limit") => {
                    let digits = strip_comment(value).replace('_', "");
                    let limit = digits.parse::<u64>().map_err(|_| {
                        config_error(format!(
                            "line {}: step_limit must be a non-negative integer, found '{}'",
                            line_no, value
                        ))
                    })?;
                    config.step_limit = Some(limit);
                }
                ("eval", "trace") => {
                    config.trace = match strip_comment(value) {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(config_error(format!(
                                "line {}: trace must be true or false, found '{}'",
                                line_no, other
                            )))
                        }
                    };
                }
                ("repl", "prompt") => {
                    config.prompt = parse_string(value).ok_or_else(|| {
                        config_error(format!(
                            "line {}: prompt must be a quoted string, found '{}'",
                            line_no, value
                        ))
                    })?;
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Try to find a nock.toml in the given directory or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(Self::FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// The settings in effect for `start_dir`: the nearest nock.toml, or the
    /// defaults when there is none.
    pub fn discover(start_dir: &Path) -> Result<Config, Diagnostic> {
        match Self::find(start_dir) {
            Some(path) => {
                log::debug!("using {}", path.display());
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }
}
