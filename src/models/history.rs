use serde::Serialize;

/// Sampling classification chosen at withdrawal (baixa) time.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SamplingType {
    Avr,
    Conventional,
}

impl SamplingType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SamplingType::Avr => "AVR",
            SamplingType::Conventional => "Conventional",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "AVR" => Some(SamplingType::Avr),
            "Conventional" => Some(SamplingType::Conventional),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "avr" => Some(SamplingType::Avr),
            "conventional" | "conv" => Some(SamplingType::Conventional),
            _ => None,
        }
    }
}

/// Closure record written once per ticket at withdrawal time.
/// Read-only after creation.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub ticket_id: i64,
    pub ticket_number: String,
    pub sampling_type: SamplingType,
    pub withdrawn_at: String,
    pub notes: String,
}
