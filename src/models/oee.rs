use serde::Serialize;

/// Persisted state of an OEE record: one per (ticket, cabin) run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum OeeStatus {
    Awaiting,
    InProgress,
    Finished,
}

impl OeeStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OeeStatus::Awaiting => "awaiting",
            OeeStatus::InProgress => "in_progress",
            OeeStatus::Finished => "finished",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "awaiting" => Some(OeeStatus::Awaiting),
            "in_progress" => Some(OeeStatus::InProgress),
            "finished" => Some(OeeStatus::Finished),
            _ => None,
        }
    }
}

/// Timing record of one cabin run.
///
/// `elapsed_seconds` is net running time (pauses excluded), flushed at
/// every state transition. `total_seconds` is the gross span
/// `ended_at - started_at`, recorded at finish; cycle-time statistics
/// and the efficiency denominator use the gross figure.
#[derive(Debug, Clone, Serialize)]
pub struct OeeRecord {
    pub id: i64,
    pub ticket_id: i64,
    pub cabin: String,
    pub operator: String, // 5-digit badge
    pub started_at: String,
    pub ended_at: String, // empty until finished
    pub elapsed_seconds: i64,
    pub total_seconds: i64,
    pub status: OeeStatus,
}

/// Run state of a cabin, derived on demand, never stored.
/// No in-progress record → Awaiting; open pause interval → Paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Awaiting,
    Running,
    Paused,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Awaiting => "awaiting",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }
}
