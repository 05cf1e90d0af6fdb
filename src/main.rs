//! shellgate CLI.
//!
//! Usage: shellgate [--exec] [--json] <command...>
//!
//! The command is the space-join of the remaining arguments. Default mode is
//! check-only: classify, report, exit 0 (allowed/deferred) or 1 (blocked).
//! With --exec the gate confirms ask-tier matches interactively, runs the
//! command through `sh -c`, and propagates its exit status verbatim.
//!
//! SHELLGATE_DATA_THEFT=true enables the data-exfiltration tier, overriding
//! the `data_theft` setting in the rule configuration.

use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use shellgate::audit;
use shellgate::classify::Classifier;
use shellgate::command::Command;
use shellgate::config::Config;
use shellgate::engine::{Engine, Mode, ShellExecutor, StdinConfirm};

/// Environment toggle for the data-theft tier. "true" (any case) or "1"
/// enables it, anything else disables; unset falls back to the config
/// setting.
const DATA_THEFT_ENV: &str = "SHELLGATE_DATA_THEFT";

fn usage() -> ! {
    eprintln!("Usage: shellgate [--exec] [--json] <command...>");
    std::process::exit(1);
}

/// Interpret an environment toggle value, case-insensitively.
fn env_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Warn,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let mut exec_mode = false;
    let mut json_output = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.peek() {
        match arg.as_str() {
            "--exec" => exec_mode = true,
            "--json" => json_output = true,
            _ => break,
        }
        args.next();
    }

    let words: Vec<String> = args.collect();
    if words.is_empty() {
        usage();
    }
    let raw = words.join(" ");

    let config = Config::load();
    let data_theft = match std::env::var(DATA_THEFT_ENV) {
        Ok(v) => env_flag(&v),
        Err(_) => config.settings.data_theft,
    };

    let classifier = Classifier::new(config.into_rule_set(), data_theft);
    let mode = if exec_mode { Mode::Execute } else { Mode::Check };
    let mut gate = Engine::new(classifier, mode, StdinConfirm, ShellExecutor);

    let command = Command::parse(&raw);
    let outcome = gate.run(&command);
    audit::record(&command, &outcome);

    if json_output {
        let report = serde_json::json!({
            "decision": outcome.decision.as_str(),
            "tier": outcome.tier.map(|t| t.as_str()),
            "reason": outcome.reason,
            "status": outcome.status,
        });
        match serde_json::to_string(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("shellgate: report serialization failed: {e}"),
        }
    }

    std::process::exit(outcome.status);
}
