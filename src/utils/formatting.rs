//! Formatting utilities used for CLI and export outputs.

use crate::models::duty_status::DutyStatus;
use crate::models::hos_status::ComplianceStatus;

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // e.g. +02:25
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // e.g. 02h 25m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Text label and ANSI colour for a duty status.
pub fn describe_status(status: DutyStatus) -> (&'static str, &'static str) {
    match status {
        DutyStatus::Driving => (status.label(), "\x1b[32m"),
        DutyStatus::OnDutyNotDriving => (status.label(), "\x1b[33m"),
        DutyStatus::SleeperBerth => (status.label(), "\x1b[34m"),
        DutyStatus::OffDuty => (status.label(), "\x1b[90m"),
    }
}

pub fn describe_compliance(status: ComplianceStatus) -> (&'static str, &'static str) {
    match status {
        ComplianceStatus::Compliant => ("COMPLIANT", "\x1b[32;1m"),
        ComplianceStatus::Violation => ("VIOLATION", "\x1b[41;97;1m"),
        ComplianceStatus::Pending => ("PENDING", "\x1b[90m"),
    }
}

/// Cut `s` to `max` visible chars, ending with "..." when shortened.
pub fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
