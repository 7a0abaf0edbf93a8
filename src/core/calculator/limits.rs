//! Regulatory limits and evaluation policy for the HOS calculator.

use serde::{Deserialize, Serialize};

pub const DRIVE_LIMIT: i64 = 11 * 60;
pub const ON_DUTY_LIMIT: i64 = 14 * 60;
pub const CYCLE_LIMIT: i64 = 70 * 60;
pub const RESTART_REST: i64 = 34 * 60;
pub const CYCLE_DAYS: i64 = 7;
pub const BREAK_AFTER_DRIVING: i64 = 8 * 60;
pub const BREAK_MINUTES: i64 = 30;

/// Limits in minutes (cycle window in days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HosLimits {
    #[serde(default = "default_drive")]
    pub drive_minutes: i64,
    #[serde(default = "default_on_duty")]
    pub on_duty_minutes: i64,
    #[serde(default = "default_cycle")]
    pub cycle_minutes: i64,
    #[serde(default = "default_restart")]
    pub restart_minutes: i64,
    #[serde(default = "default_cycle_days")]
    pub cycle_days: i64,
    #[serde(default = "default_break_after")]
    pub break_after_driving_minutes: i64,
    #[serde(default = "default_break")]
    pub break_minutes: i64,
}

fn default_drive() -> i64 {
    DRIVE_LIMIT
}
fn default_on_duty() -> i64 {
    ON_DUTY_LIMIT
}
fn default_cycle() -> i64 {
    CYCLE_LIMIT
}
fn default_restart() -> i64 {
    RESTART_REST
}
fn default_cycle_days() -> i64 {
    CYCLE_DAYS
}
fn default_break_after() -> i64 {
    BREAK_AFTER_DRIVING
}
fn default_break() -> i64 {
    BREAK_MINUTES
}

impl Default for HosLimits {
    fn default() -> Self {
        Self {
            drive_minutes: DRIVE_LIMIT,
            on_duty_minutes: ON_DUTY_LIMIT,
            cycle_minutes: CYCLE_LIMIT,
            restart_minutes: RESTART_REST,
            cycle_days: CYCLE_DAYS,
            break_after_driving_minutes: BREAK_AFTER_DRIVING,
            break_minutes: BREAK_MINUTES,
        }
    }
}

/// How an entry that straddles a window start is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Count only the part of the entry inside `[window_start, now]`.
    #[default]
    Clip,
    /// Count the whole entry iff it starts inside the window (legacy behaviour).
    StartTime,
}

impl WindowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Clip => "clip",
            WindowMode::StartTime => "start_time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HosRules {
    #[serde(default)]
    pub limits: HosLimits,
    #[serde(default)]
    pub window_mode: WindowMode,
    #[serde(default = "default_enforce_break")]
    pub enforce_break: bool,
}

fn default_enforce_break() -> bool {
    true
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            limits: HosLimits::default(),
            window_mode: WindowMode::default(),
            enforce_break: default_enforce_break(),
        }
    }
}

impl HosRules {
    /// Rules reproducing the legacy calculator: start-time windows, no break check.
    pub fn legacy() -> Self {
        Self {
            limits: HosLimits::default(),
            window_mode: WindowMode::StartTime,
            enforce_break: false,
        }
    }
}
