use super::duty_status::DutyStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    #[serde(rename = "11_hour")]
    ElevenHour,
    #[serde(rename = "14_hour")]
    FourteenHour,
    #[serde(rename = "70_hour")]
    SeventyHour,
    #[serde(rename = "30_min_break")]
    ThirtyMinuteBreak,
}

impl ViolationKind {
    /// Short stable id, also used as the DB discriminator.
    pub fn id(&self) -> &'static str {
        match self {
            ViolationKind::ElevenHour => "11",
            ViolationKind::FourteenHour => "14",
            ViolationKind::SeventyHour => "70",
            ViolationKind::ThirtyMinuteBreak => "30",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ViolationKind::ElevenHour => "11_hour",
            ViolationKind::FourteenHour => "14_hour",
            ViolationKind::SeventyHour => "70_hour",
            ViolationKind::ThirtyMinuteBreak => "30_min_break",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "11_hour" => Some(ViolationKind::ElevenHour),
            "14_hour" => Some(ViolationKind::FourteenHour),
            "70_hour" => Some(ViolationKind::SeventyHour),
            "30_min_break" => Some(ViolationKind::ThirtyMinuteBreak),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ViolationKind::ElevenHour => "Exceeded 11-hour driving limit",
            ViolationKind::FourteenHour => "Exceeded 14-hour on-duty limit",
            ViolationKind::SeventyHour => "Exceeded 70-hour cycle limit",
            ViolationKind::ThirtyMinuteBreak => {
                "Drove more than 8 hours without a 30-minute break"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Major,
}

impl Severity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "minor" => Some(Severity::Minor),
            "major" => Some(Severity::Major),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationState {
    Open,
    Resolved,
}

impl ViolationState {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ViolationState::Open => "open",
            ViolationState::Resolved => "resolved",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ViolationState::Open),
            "resolved" => Some(ViolationState::Resolved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HosViolation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub description: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
    pub status: ViolationState,
}

impl HosViolation {
    pub fn open(kind: ViolationKind, severity: Severity, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: kind.id().to_string(),
            kind,
            description: kind.description().to_string(),
            severity,
            timestamp,
            resolved: false,
            status: ViolationState::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Violation,
    Pending,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Violation => "violation",
            ComplianceStatus::Pending => "pending",
        }
    }
}

/// Point-in-time compliance snapshot. All durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverHosStatus {
    pub driver_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub current_status: DutyStatus,
    pub available_drive_time: i64,
    pub available_on_duty_time: i64,
    pub available_cycle_time: i64,
    pub used_drive_time: i64,
    pub used_on_duty_time: i64,
    pub cycle_limit: i64,
    pub used_cycle_hours: i64,
    pub drive_time_until_break: i64,
    pub restart_available: bool,
    pub violations: Vec<HosViolation>,
    pub last_logged_at: Option<DateTime<Utc>>,
    pub compliance_status: ComplianceStatus,
}

impl DriverHosStatus {
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

/// A violation materialized in the `violations` table.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationRecord {
    pub id: i64,
    pub driver_id: String,
    pub kind: ViolationKind,
    pub description: String,
    pub severity: Severity,
    pub status: ViolationState,
    pub log_date: String,
    pub detected_at: String,
    pub resolved_at: Option<String>,
}
