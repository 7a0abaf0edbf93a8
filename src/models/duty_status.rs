use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Driving, // D
    #[serde(alias = "on_duty")]
    OnDutyNotDriving, // ON
    SleeperBerth, // SB
    OffDuty,  // OFF
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
        DutyStatus::SleeperBerth,
        DutyStatus::OffDuty,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "D",
            DutyStatus::OnDutyNotDriving => "ON",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::OffDuty => "OFF",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "driving",
            DutyStatus::OnDutyNotDriving => "on_duty_not_driving",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::OffDuty => "off_duty",
        }
    }

    /// Convert DB string → enum.
    /// `on_duty` is the spelling used by older log producers.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "driving" => Some(DutyStatus::Driving),
            "on_duty_not_driving" | "on_duty" => Some(DutyStatus::OnDutyNotDriving),
            "sleeper_berth" => Some(DutyStatus::SleeperBerth),
            "off_duty" => Some(DutyStatus::OffDuty),
            _ => None,
        }
    }

    /// Helper: accept either the short code (D/ON/SB/OFF, any case) or the full name.
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_lowercase();
        match lower.as_str() {
            "d" => Some(DutyStatus::Driving),
            "on" => Some(DutyStatus::OnDutyNotDriving),
            "sb" => Some(DutyStatus::SleeperBerth),
            "off" => Some(DutyStatus::OffDuty),
            other => DutyStatus::from_db_str(other),
        }
    }

    /// Driving and on-duty-not-driving both count against the 14-hour and cycle limits.
    pub fn is_on_duty(&self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDutyNotDriving)
    }

    pub fn is_driving(&self) -> bool {
        matches!(self, DutyStatus::Driving)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On duty (not driving)",
            DutyStatus::SleeperBerth => "Sleeper berth",
            DutyStatus::OffDuty => "Off duty",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
