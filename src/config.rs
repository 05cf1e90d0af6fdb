//! Rule configuration: embedded defaults plus user override files.
//!
//! Resolution order:
//! 1. `./.shellgate/rules.toml` (project-local)
//! 2. `~/.config/shellgate/rules.toml`
//! 3. embedded `rules.default.toml`
//!
//! A file that exists but fails to parse degrades to empty deny/ask/allow
//! tiers with a warning — the built-in harm/theft catalogs still apply, so
//! bad configuration fails closed rather than aborting classification.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::pattern::Pattern;
use crate::rules::{Rule, RuleSet};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../rules.default.toml");

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub deny: Vec<RawRule>,
    #[serde(default)]
    pub ask: Vec<RawRule>,
    #[serde(default)]
    pub allow: Vec<RawRule>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Enable the data-exfiltration tier. Off by default; the
    /// SHELLGATE_DATA_THEFT environment variable overrides this.
    #[serde(default)]
    pub data_theft: bool,
}

/// One rule as written in TOML, pattern still in source form.
#[derive(Debug, Deserialize)]
pub struct RawRule {
    pub pattern: String,
    pub message: Option<String>,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    pub prompt: Option<String>,
}

impl RawRule {
    fn into_rule(self) -> Rule {
        Rule {
            pattern: Pattern::parse(&self.pattern),
            message: self.message,
            reason: self.reason,
            suggestion: self.suggestion,
            alternatives: self.alternatives,
            prompt: self.prompt,
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration from the first file found in the search path,
    /// falling back to the embedded defaults.
    pub fn load() -> Self {
        for path in search_paths() {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            return Self::from_file_contents(&path, &content);
        }
        Self::default_config()
    }

    /// Parse the contents of a user configuration file. A file that fails
    /// to parse yields empty rule tiers, not the embedded defaults.
    fn from_file_contents(path: &Path, content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "{}: config parse error, using empty rule tiers: {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Parse all rule patterns and build the runtime rule set.
    pub fn into_rule_set(self) -> RuleSet {
        RuleSet {
            deny: self.deny.into_iter().map(RawRule::into_rule).collect(),
            ask: self.ask.into_iter().map(RawRule::into_rule).collect(),
            allow: self.allow.into_iter().map(RawRule::into_rule).collect(),
        }
    }
}

fn search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(".shellgate/rules.toml"),
        PathBuf::from(shellexpand::tilde("~/.config/shellgate/rules.toml").into_owned()),
    ]
}
