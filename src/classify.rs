//! Tiered classification: built-in catalogs first, then configured tiers.

use crate::catalog;
use crate::command::Command;
use crate::rules::{Rule, RuleSet, resolve};

/// Priority level that produced a verdict. Evaluation order is exactly the
/// declaration order here: SystemHarm → DataTheft → Deny → Ask → Allow →
/// Default. A lower tier is never consulted once a higher one matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    SystemHarm,
    DataTheft,
    Deny,
    Ask,
    Allow,
    /// Pseudo-tier for commands no rule or catalog matched.
    Default,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::SystemHarm => "system-harm",
            Tier::DataTheft => "data-theft",
            Tier::Deny => "deny",
            Tier::Ask => "ask",
            Tier::Allow => "allow",
            Tier::Default => "default",
        }
    }
}

/// Result of classifying one command: the tier that matched, the matched
/// configuration rule (None for catalog tiers and Default), and a reason.
#[derive(Debug)]
pub struct Verdict<'a> {
    pub tier: Tier,
    pub rule: Option<&'a Rule>,
    pub reason: String,
}

/// The tiered classifier. Holds the immutable rule set for one invocation
/// (or process lifetime); the data-theft toggle is fixed at construction so
/// classification stays pure.
#[derive(Debug)]
pub struct Classifier {
    rules: RuleSet,
    data_theft_enabled: bool,
}

impl Classifier {
    /// Classifier over configured tiers plus the built-in catalogs.
    pub fn new(rules: RuleSet, data_theft_enabled: bool) -> Self {
        Self {
            rules,
            data_theft_enabled,
        }
    }

    /// Catalog-only classifier (no configured deny/ask/allow tiers).
    pub fn heuristics_only(data_theft_enabled: bool) -> Self {
        Self::new(RuleSet::empty(), data_theft_enabled)
    }

    /// Walk the tiers in priority order and return the first match.
    pub fn classify(&self, command: &Command) -> Verdict<'_> {
        if let Some(reason) = catalog::system_harm(command) {
            return Verdict {
                tier: Tier::SystemHarm,
                rule: None,
                reason,
            };
        }

        if self.data_theft_enabled
            && let Some(reason) = catalog::data_theft(command)
        {
            return Verdict {
                tier: Tier::DataTheft,
                rule: None,
                reason,
            };
        }

        for (tier, rules) in [
            (Tier::Deny, &self.rules.deny),
            (Tier::Ask, &self.rules.ask),
            (Tier::Allow, &self.rules.allow),
        ] {
            if let Some(rule) = resolve(command, rules) {
                return Verdict {
                    tier,
                    rule: Some(rule),
                    reason: rule.reason_text().to_string(),
                };
            }
        }

        Verdict {
            tier: Tier::Default,
            rule: None,
            reason: "no matching rule".into(),
        }
    }
}
