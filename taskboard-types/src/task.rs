use std::{cmp::Ordering, fmt::Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// 2099-12-31T00:00:00Z, the effective date of tasks without any date.
const SENTINEL_TIMESTAMP: i64 = 4_102_358_400;

/// Far-future date that undated tasks sort by, so they land after every dated task.
pub fn sentinel_date() -> DateTime<Utc> {
    DateTime::from_timestamp(SENTINEL_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub task_id: String,
    pub name: String,
    pub kind: TaskKind,
    pub priority: TaskPriority,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub expected_end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub status_code: i64,
    pub status_code_formatted: String,
    pub state_code: i64,
    pub assigned_to: String,
    pub assigned_to_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_case_name: Option<String>,
}

impl Task {
    /// Start date if present, else the expected end date.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.start_date.or(self.expected_end_date)
    }

    pub fn sort_date(&self) -> DateTime<Utc> {
        self.effective_date().unwrap_or_else(sentinel_date)
    }

    /// Priority ordinal first (smaller is more urgent), then effective date.
    pub fn urgency_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.sort_date().cmp(&other.sort_date()))
    }

    pub fn is_completed(&self) -> bool {
        self.status_code_formatted
            .to_lowercase()
            .contains("completed")
    }

    pub fn due_label(&self, now: DateTime<Utc>) -> String {
        let Some(date) = self.effective_date() else {
            return "No date set".into();
        };

        let hours = (date - now).num_milliseconds().div_euclid(3_600_000);
        let days = hours.div_euclid(24);

        match hours {
            h if h < 0 => "Overdue".into(),
            h if h < 1 => "Due in < 1 hour".into(),
            h if h < 24 => format!("Due in {h} hours"),
            _ if days == 1 => "Due tomorrow".into(),
            _ => format!("Due in {days} days"),
        }
    }
}

/// Sorts by urgency. The sort is stable, so ties keep their input order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(Task::urgency_cmp);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum TaskKind {
    Inspection,
    Maintenance,
}

impl TaskKind {
    /// Record store entity that holds tasks of this kind.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Inspection => "apex_inspectionvisit",
            Self::Maintenance => "apex_maintenanceactivity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const VARIANTS: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn lane_label(&self) -> &'static str {
        match self {
            Self::High => "Immediate",
            Self::Medium => "Maintenance",
            Self::Low => "Low",
        }
    }
}

/// Raw priority ordinal together with the tier it maps to.
///
/// Only constructible from the ordinal, so tier and value cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct TaskPriority {
    tier: PriorityTier,
    value: i64,
}

impl TaskPriority {
    pub const HIGH: i64 = 455_220_000;
    pub const MEDIUM: i64 = 455_220_001;
    pub const LOW: i64 = 455_220_002;

    pub fn new(value: i64) -> Self {
        let tier = match value {
            Self::HIGH => PriorityTier::High,
            Self::MEDIUM => PriorityTier::Medium,
            Self::LOW => PriorityTier::Low,
            _ => PriorityTier::Low,
        };
        Self { tier, value }
    }

    pub fn tier(&self) -> PriorityTier {
        self.tier
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::new(Self::LOW)
    }
}

impl From<i64> for TaskPriority {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<TaskPriority> for i64 {
    fn from(value: TaskPriority) -> Self {
        value.value
    }
}

impl PartialOrd for TaskPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaskPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tier)
    }
}
