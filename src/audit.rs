//! Append-only audit log: one line per decision.
//!
//! Best-effort: failures are silently ignored (auditing must never block
//! the gate). Each entry is a single `writeln!` on an append-mode handle,
//! so concurrent gate processes never interleave mid-line.

use std::io::Write;

use crate::command::Command;
use crate::engine::Outcome;

/// Longest command text written to the log.
const MAX_COMMAND_LEN: usize = 200;

/// One write-once audit record.
#[derive(Debug)]
pub struct AuditEntry {
    pub timestamp: String,
    pub tag: &'static str,
    pub command: String,
    pub reason: String,
}

impl AuditEntry {
    /// Build an entry for a finished classification.
    pub fn new(command: &Command, outcome: &Outcome) -> Self {
        Self {
            timestamp: timestamp_now(),
            tag: outcome.audit_tag(),
            command: command.raw.chars().take(MAX_COMMAND_LEN).collect(),
            reason: outcome.reason.replace('\n', "; "),
        }
    }

    /// The tab-separated log line (no trailing newline).
    pub fn line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.timestamp, self.tag, self.command, self.reason
        )
    }
}

/// Append a decision record to `~/.local/share/shellgate/audit.log`.
pub fn record(command: &Command, outcome: &Outcome) {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/shellgate");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_path = log_dir.join("audit.log");
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };

    let entry = AuditEntry::new(command, outcome);
    let _ = writeln!(file, "{}", entry.line());
}

/// Simple UTC timestamp without external deps.
fn timestamp_now() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = secs / 86400;
    let rem = secs % 86400;
    let h = rem / 3600;
    let m = (rem % 3600) / 60;
    let s = rem % 60;
    let (year, month, day) = epoch_days_to_date(days);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
