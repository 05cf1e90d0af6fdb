//! Rule pattern parsing and matching.
//!
//! A pattern is `program[:argSpec]`. The program part is a literal name or
//! `*`; the argSpec is `*` (any arguments), a `regex:`-prefixed expression
//! searched case-insensitively against the argument string, or a literal
//! substring searched case-sensitively. Parsing never fails: an unrecognized
//! form degrades to substring semantics, and a regex that does not compile
//! becomes a never-matching spec with a warning.

use log::warn;
use regex::{Regex, RegexBuilder};

use crate::command::Command;

/// Wildcard token accepted for both the program and argument positions.
const WILDCARD: &str = "*";

/// Prefix selecting regex matching for the argument spec.
const REGEX_PREFIX: &str = "regex:";

/// How a pattern matches the argument string.
#[derive(Debug, Clone)]
pub enum ArgSpec {
    /// `*` or omitted — any arguments (program match is sufficient).
    Any,
    /// Literal substring of the argument string (case-sensitive).
    Substring(String),
    /// Case-insensitive regex search of the argument string.
    /// `None` means the source expression failed to compile; it never matches.
    Regex(Option<Regex>),
}

/// A parsed matching spec for one rule.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Literal program name, or `*` for any program.
    pub program: String,
    /// Argument matching spec.
    pub args: ArgSpec,
    /// The original pattern text, kept for reasons and audit lines.
    pub source: String,
}

impl Pattern {
    /// Parse a pattern from rule source text (`program[:argSpec]`).
    pub fn parse(text: &str) -> Self {
        let (program, arg_spec) = match text.split_once(':') {
            Some((p, a)) => (p, a),
            None => (text, WILDCARD),
        };

        let args = if arg_spec == WILDCARD {
            ArgSpec::Any
        } else if let Some(expr) = arg_spec.strip_prefix(REGEX_PREFIX) {
            match RegexBuilder::new(expr).case_insensitive(true).build() {
                Ok(re) => ArgSpec::Regex(Some(re)),
                Err(e) => {
                    warn!("pattern '{text}': bad regex, rule will never match: {e}");
                    ArgSpec::Regex(None)
                }
            }
        } else {
            ArgSpec::Substring(arg_spec.to_string())
        };

        Self {
            program: program.to_string(),
            args,
            source: text.to_string(),
        }
    }

    /// Does this pattern match the command?
    pub fn matches(&self, command: &Command) -> bool {
        if command.is_empty() {
            return false;
        }
        if self.program != WILDCARD && command.program != self.program {
            return false;
        }
        match &self.args {
            ArgSpec::Any => true,
            ArgSpec::Substring(s) => command.arg_string.contains(s),
            ArgSpec::Regex(Some(re)) => re.is_match(&command.arg_string),
            ArgSpec::Regex(None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, command: &str) -> bool {
        Pattern::parse(pattern).matches(&Command::parse(command))
    }

    #[test]
    fn program_only_matches_any_args() {
        assert!(matches("rm", "rm -rf /tmp"));
        assert!(matches("rm", "rm"));
    }

    #[test]
    fn program_mismatch() {
        assert!(!matches("rm", "ls -la"));
    }

    #[test]
    fn explicit_wildcard_args() {
        assert!(matches("shutdown:*", "shutdown -h now"));
    }

    #[test]
    fn wildcard_program() {
        assert!(matches("*:--no-preserve-root", "rm --no-preserve-root /"));
        assert!(matches("*:--no-preserve-root", "chown --no-preserve-root -R /"));
    }

    #[test]
    fn substring_is_case_sensitive() {
        assert!(matches("npm:install", "npm install left-pad"));
        assert!(!matches("npm:install", "npm INSTALL left-pad"));
    }

    #[test]
    fn substring_no_match() {
        assert!(!matches("npm:install", "npm run build"));
    }

    #[test]
    fn regex_is_case_insensitive() {
        assert!(matches("git:regex:push\\s+.*--force", "git push origin --force"));
        assert!(matches("git:regex:push\\s+.*--force", "git PUSH origin --FORCE"));
    }

    #[test]
    fn regex_searches_args_not_program() {
        // "git" only appears in the program position
        assert!(!matches("git:regex:git", "git status"));
    }

    #[test]
    fn malformed_regex_never_matches() {
        assert!(!matches("rm:regex:[unclosed", "rm -rf /"));
        assert!(!matches("rm:regex:[unclosed", "rm [unclosed"));
    }

    #[test]
    fn empty_command_matches_nothing() {
        assert!(!matches("*", ""));
        assert!(!matches("*:*", "   "));
    }

    #[test]
    fn colon_in_regex_body_survives_split() {
        assert!(matches("curl:regex:https?://evil", "curl http://evil.example"));
    }
}
