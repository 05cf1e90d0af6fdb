//! Decision engine: combines the classifier's verdict with the invocation
//! mode and, when required, an interactive confirmation, then hands approved
//! commands to the executor.

use std::io::{self, BufRead, Write};

use crate::classify::{Classifier, Tier, Verdict};
use crate::command::Command;
use crate::message;
use crate::rules::Rule;

/// Exit status when the executor cannot start the command at all
/// (as opposed to the command itself exiting non-zero).
pub const EXEC_ERROR_STATUS: i32 = 126;

/// Invocation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Classify and report; never prompt, never execute.
    Check,
    /// Classify, confirm if needed, then run the command.
    Execute,
}

/// Terminal outcome of classifying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Blocked,
    AskDeferred,
    DeniedByUser,
    ApprovedByUser,
    Allowed,
    AllowedDefault,
    ExecutionError,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Blocked => "blocked",
            Decision::AskDeferred => "ask-deferred",
            Decision::DeniedByUser => "denied-by-user",
            Decision::ApprovedByUser => "approved-by-user",
            Decision::Allowed => "allowed",
            Decision::AllowedDefault => "allowed-default",
            Decision::ExecutionError => "execution-error",
        }
    }
}

/// The decision plus everything needed to audit and report it.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub decision: Decision,
    /// Tier that produced the decision; None for `AllowedDefault`.
    pub tier: Option<Tier>,
    pub reason: String,
    /// Process exit status to propagate.
    pub status: i32,
}

impl Outcome {
    /// Tag written to the audit log for this outcome.
    pub fn audit_tag(&self) -> &'static str {
        match (self.decision, self.tier) {
            (Decision::Blocked, Some(Tier::SystemHarm)) => "BLOCKED-HARM",
            (Decision::Blocked, Some(Tier::DataTheft)) => "BLOCKED-DATA",
            (Decision::Blocked, _) => "BLOCKED",
            (Decision::AskDeferred, _) => "ASK-DEFERRED",
            (Decision::DeniedByUser, _) => "DENIED-BY-USER",
            (Decision::ApprovedByUser, _) => "APPROVED-BY-USER",
            (Decision::Allowed, _) => "ALLOWED",
            (Decision::AllowedDefault, _) => "ALLOWED-DEFAULT",
            (Decision::ExecutionError, _) => "EXEC-ERROR",
        }
    }
}

/// Yes/no confirmation for ask-tier matches.
pub trait Confirm {
    /// Present the rule to the user and return whether they approved.
    fn confirm(&mut self, rule: &Rule, command: &Command) -> bool;
}

/// Runs an approved command and reports its exit status.
pub trait Executor {
    /// Run the raw command string. `Err` means the command could not be
    /// started at all; a non-zero exit is `Ok(code)`.
    fn execute(&mut self, command: &str) -> io::Result<i32>;
}

// No-op collaborators for check-only embedding: `()` denies every prompt
// and executes nothing.
impl Confirm for () {
    fn confirm(&mut self, _rule: &Rule, _command: &Command) -> bool {
        false
    }
}

impl Executor for () {
    fn execute(&mut self, _command: &str) -> io::Result<i32> {
        Ok(0)
    }
}

/// Interactive confirmation on stdin. End-of-input or a read error counts
/// as a denial, same as any answer other than `y`.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, rule: &Rule, command: &Command) -> bool {
        message::print_ask(rule, command);
        eprint!("\nProceed? [y/N]: ");
        let _ = io::stderr().flush();
        read_answer(&mut io::stdin().lock())
    }
}

/// Read one line and interpret it as a yes/no answer. End-of-input and
/// read errors count as no.
fn read_answer(reader: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => {
            eprintln!("\nCancelled");
            false
        }
        Ok(_) => line.trim().eq_ignore_ascii_case("y"),
    }
}

/// Runs commands through `sh -c`, like the agent's own shell would.
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    fn execute(&mut self, command: &str) -> io::Result<i32> {
        let status = std::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()?;
        // Killed-by-signal has no code; report generic failure
        Ok(status.code().unwrap_or(1))
    }
}

/// The state machine that turns a verdict into a terminal [`Outcome`].
pub struct Engine<C, E> {
    classifier: Classifier,
    mode: Mode,
    confirm: C,
    executor: E,
}

impl<C: Confirm, E: Executor> Engine<C, E> {
    pub fn new(classifier: Classifier, mode: Mode, confirm: C, executor: E) -> Self {
        Self {
            classifier,
            mode,
            confirm,
            executor,
        }
    }

    /// Classify the command and drive it to a terminal decision.
    pub fn run(&mut self, command: &Command) -> Outcome {
        let Verdict { tier, rule, reason } = self.classifier.classify(command);

        match tier {
            // Catalog denials are never downgraded, in either mode.
            Tier::SystemHarm => {
                message::print_catalog_block("System Harm", &reason);
                blocked(tier, reason)
            }
            Tier::DataTheft => {
                message::print_catalog_block("Data Protection", &reason);
                blocked(tier, reason)
            }
            Tier::Deny => {
                if let Some(rule) = rule {
                    message::print_block(rule, command);
                }
                blocked(tier, reason)
            }
            Tier::Ask => match self.mode {
                // Check-only: surface the deferral without prompting. A
                // later execute-mode invocation owns the confirmation.
                Mode::Check => Outcome {
                    decision: Decision::AskDeferred,
                    tier: Some(tier),
                    reason,
                    status: 0,
                },
                Mode::Execute => {
                    let approved = match rule {
                        Some(rule) => self.confirm.confirm(rule, command),
                        None => false,
                    };
                    if approved {
                        Self::finish(
                            self.mode,
                            &mut self.executor,
                            Decision::ApprovedByUser,
                            Some(tier),
                            reason,
                            command,
                        )
                    } else {
                        Outcome {
                            decision: Decision::DeniedByUser,
                            tier: Some(tier),
                            reason,
                            status: 1,
                        }
                    }
                }
            },
            Tier::Allow => Self::finish(
                self.mode,
                &mut self.executor,
                Decision::Allowed,
                Some(tier),
                reason,
                command,
            ),
            Tier::Default => Self::finish(
                self.mode,
                &mut self.executor,
                Decision::AllowedDefault,
                None,
                reason,
                command,
            ),
        }
    }

    /// Terminal step for a command that passed classification: report in
    /// check mode, execute in execute mode.
    fn finish(
        mode: Mode,
        executor: &mut E,
        decision: Decision,
        tier: Option<Tier>,
        reason: String,
        command: &Command,
    ) -> Outcome {
        match mode {
            Mode::Check => Outcome {
                decision,
                tier,
                reason,
                status: 0,
            },
            Mode::Execute => match executor.execute(&command.raw) {
                Ok(code) => Outcome {
                    decision,
                    tier,
                    reason,
                    status: code,
                },
                Err(e) => Outcome {
                    decision: Decision::ExecutionError,
                    tier,
                    reason: format!("failed to start command: {e}"),
                    status: EXEC_ERROR_STATUS,
                },
            },
        }
    }
}

fn blocked(tier: Tier, reason: String) -> Outcome {
    Outcome {
        decision: Decision::Blocked,
        tier: Some(tier),
        reason,
        status: 1,
    }
}
