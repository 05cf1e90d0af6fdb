//! Rendering of block messages and confirmation prompts to stderr.
//!
//! Rule text may contain `{command}` and `{reason}` placeholders. A
//! placeholder with no binding is left as literal text; rendering never
//! fails on malformed templates.

use crate::command::Command;
use crate::rules::Rule;

const SEPARATOR: &str =
    "======================================================================";

/// Substitute `{name}` placeholders from `vars`. Unknown placeholders and
/// stray braces pass through unchanged.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Expand a rule's optional text field with the standard placeholder set.
fn expand(text: &str, rule: &Rule, command: &Command) -> String {
    render_template(
        text,
        &[("command", &command.raw), ("reason", rule.reason_text())],
    )
}

/// Print the helpful block message for a deny-rule match.
pub fn print_block(rule: &Rule, command: &Command) {
    eprintln!("\n{SEPARATOR}");

    let message = rule.message.as_deref().unwrap_or("Command blocked");
    eprintln!("{}", expand(message, rule, command));

    if let Some(reason) = &rule.reason {
        eprintln!("\nReason: {}", expand(reason, rule, command));
    }

    if let Some(suggestion) = &rule.suggestion {
        eprintln!("\nSuggested alternative:");
        for line in expand(suggestion.trim(), rule, command).lines() {
            eprintln!("   {line}");
        }
    }

    if !rule.alternatives.is_empty() {
        eprintln!("\nSafe alternatives:");
        for alt in &rule.alternatives {
            eprintln!("   - {}", expand(alt, rule, command));
        }
    }

    eprintln!("{SEPARATOR}\n");
}

/// Print the confirmation prompt header for an ask-rule match.
/// The caller reads the yes/no answer afterwards.
pub fn print_ask(rule: &Rule, command: &Command) {
    eprintln!("\n{SEPARATOR}");

    let message = rule.message.as_deref().unwrap_or("Confirmation required");
    eprintln!("{}", expand(message, rule, command));

    if let Some(prompt) = &rule.prompt {
        eprintln!("\n{}", expand(prompt.trim(), rule, command));
    }

    eprintln!("\nCommand: {}", command.raw);
    if let Some(reason) = &rule.reason {
        eprintln!("Reason: {}", expand(reason, rule, command));
    }

    eprintln!("{SEPARATOR}");
}

/// Print the block notice for a built-in catalog match (no rule metadata).
pub fn print_catalog_block(tier_label: &str, reason: &str) {
    eprintln!("BLOCKED ({tier_label}): {reason}");
}
