//! Configuration-driven rules and first-match resolution.

use crate::command::Command;
use crate::pattern::Pattern;

/// One configured rule: a pattern plus optional display/audit metadata.
///
/// Everything except `pattern` is presentation-only and has no effect on
/// matching.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub message: Option<String>,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
    pub alternatives: Vec<String>,
    pub prompt: Option<String>,
}

impl Rule {
    /// A rule with a pattern and no metadata. Used by tests and by callers
    /// that build rule sets programmatically.
    pub fn from_pattern(text: &str) -> Self {
        Self {
            pattern: Pattern::parse(text),
            message: None,
            reason: None,
            suggestion: None,
            alternatives: Vec::new(),
            prompt: None,
        }
    }

    /// The reason to log for this rule, falling back to the pattern text.
    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or(&self.pattern.source)
    }
}

/// Ordered rule lists for the three configuration tiers.
/// Order within each list is significant: first match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub deny: Vec<Rule>,
    pub ask: Vec<Rule>,
    pub allow: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set: the heuristics-only configuration.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Scan `rules` in list order and return the first whose pattern matches.
pub fn resolve<'a>(command: &Command, rules: &'a [Rule]) -> Option<&'a Rule> {
    rules.iter().find(|r| r.pattern.matches(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(patterns: &[&str]) -> Vec<Rule> {
        patterns.iter().map(|p| Rule::from_pattern(p)).collect()
    }

    #[test]
    fn resolve_first_match_wins() {
        let rs = rules(&["npm:install", "npm:*"]);
        let hit = resolve(&Command::parse("npm install left-pad"), &rs).unwrap();
        assert_eq!(hit.pattern.source, "npm:install");
    }

    #[test]
    fn resolve_skips_non_matching() {
        let rs = rules(&["pip:install", "npm:install"]);
        let hit = resolve(&Command::parse("npm install left-pad"), &rs).unwrap();
        assert_eq!(hit.pattern.source, "npm:install");
    }

    #[test]
    fn resolve_none_when_no_match() {
        let rs = rules(&["pip:install", "npm:install"]);
        assert!(resolve(&Command::parse("ls -la"), &rs).is_none());
    }

    #[test]
    fn resolve_empty_list() {
        assert!(resolve(&Command::parse("ls"), &[]).is_none());
    }

    #[test]
    fn resolve_is_deterministic() {
        let rs = rules(&["git:push", "git:*"]);
        let cmd = Command::parse("git push origin main");
        let a = resolve(&cmd, &rs).unwrap().pattern.source.clone();
        let b = resolve(&cmd, &rs).unwrap().pattern.source.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn reason_text_falls_back_to_pattern() {
        let rule = Rule::from_pattern("git:push");
        assert_eq!(rule.reason_text(), "git:push");

        let mut rule = Rule::from_pattern("git:push");
        rule.reason = Some("pushes publish history".into());
        assert_eq!(rule.reason_text(), "pushes publish history");
    }
}
