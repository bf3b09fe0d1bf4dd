use super::oee::{OeeRecord, RunState};
use super::pause::PauseInterval;
use serde::Serialize;

/// Snapshot of one cabin, reconstructed from its in-progress OEE record
/// plus that ticket's pause intervals. Derived on demand, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CabinSession {
    pub cabin: String,
    pub state: RunState,
    pub ticket_number: Option<String>,
    pub operator: Option<String>,
    pub elapsed_seconds: i64,
    pub pauses: Vec<PauseInterval>,
}

impl CabinSession {
    /// An idle cabin: nothing claimed, counter at zero.
    pub fn awaiting(cabin: &str) -> Self {
        Self {
            cabin: cabin.to_string(),
            state: RunState::Awaiting,
            ticket_number: None,
            operator: None,
            elapsed_seconds: 0,
            pauses: Vec::new(),
        }
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.len()
    }

    pub fn open_pause(&self) -> Option<&PauseInterval> {
        self.pauses.iter().rev().find(|p| p.is_open())
    }
}

/// Active session plus its backing OEE row, as loaded by SessionLogic.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub oee: OeeRecord,
    pub pauses: Vec<PauseInterval>,
}
