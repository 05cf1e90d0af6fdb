//! shellgate: a policy gate between an AI agent and the shell.
//!
//! Every command is classified against ordered rule tiers — built-in
//! system-harm and data-theft catalogs first, then configured deny/ask/allow
//! rules — producing one terminal [`engine::Decision`] per command. In
//! check-only mode the gate reports the decision; in execute mode it
//! confirms ask-tier matches interactively and runs approved commands,
//! propagating their exit status.
//!
//! # Architecture
//!
//! - **[`command`]** — Command value: raw string, program, argument string.
//! - **[`pattern`]** — Rule pattern parsing (`program:argSpec`) and matching.
//! - **[`catalog`]** — Built-in system-harm and data-exfiltration heuristics.
//! - **[`rules`]** — Rule metadata, ordered rule sets, first-match resolution.
//! - **[`classify`]** — Tiered classifier walking the priority chain.
//! - **[`engine`]** — Decision state machine, confirmation, execution.
//! - **[`message`]** — Block/ask message rendering with {placeholder} templates.
//! - **[`config`]** — TOML rule configuration: embedded defaults + user files.
//! - **[`audit`]** — Append-only decision log in `~/.local/share/shellgate/`.

/// Append-only audit logging.
pub mod audit;
/// Built-in harm and exfiltration catalogs.
pub mod catalog;
/// Tier ordering and the classifier.
pub mod classify;
/// The command value type.
pub mod command;
/// Configuration types and loading.
pub mod config;
/// The decision engine and its collaborator traits.
pub mod engine;
/// Block message and prompt rendering.
pub mod message;
/// Pattern parsing and matching.
pub mod pattern;
/// Rules, rule sets, and first-match resolution.
pub mod rules;

use classify::Classifier;
use command::Command;
use engine::{Engine, Mode, Outcome};

/// Classify a command against the default configuration in check-only mode.
///
/// This is the main entry point for tests and simple embedding. For the CLI
/// with user configuration, execute mode, or custom collaborators, build an
/// [`Engine`] directly.
pub fn check(command: &str) -> Outcome {
    let config = config::Config::default_config();
    let data_theft = config.settings.data_theft;
    let classifier = Classifier::new(config.into_rule_set(), data_theft);
    let mut engine = Engine::new(classifier, Mode::Check, (), ());
    engine.run(&Command::parse(command))
}
