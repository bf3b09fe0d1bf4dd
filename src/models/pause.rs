use serde::Serialize;

/// Why a cabin session was paused. Fixed set of labels plus a free-text
/// "Outros" entry that requires a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PauseReason {
    ShiftChange, // T
    Meal,        // A (Almoço)
    Maintenance, // M
    Meeting,     // R (Reunião)
    Other,       // O, note mandatory
}

impl PauseReason {
    pub fn code(&self) -> &'static str {
        match self {
            PauseReason::ShiftChange => "T",
            PauseReason::Meal => "A",
            PauseReason::Maintenance => "M",
            PauseReason::Meeting => "R",
            PauseReason::Other => "O",
        }
    }

    /// Label stored in the DB and shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            PauseReason::ShiftChange => "Troca de Turno",
            PauseReason::Meal => "Almoço",
            PauseReason::Maintenance => "Manutenção",
            PauseReason::Meeting => "Reunião",
            PauseReason::Other => "Outros",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Troca de Turno" => Some(PauseReason::ShiftChange),
            "Almoço" => Some(PauseReason::Meal),
            "Manutenção" => Some(PauseReason::Maintenance),
            "Reunião" => Some(PauseReason::Meeting),
            "Outros" => Some(PauseReason::Other),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "T" => Some(PauseReason::ShiftChange),
            "A" => Some(PauseReason::Meal),
            "M" => Some(PauseReason::Maintenance),
            "R" => Some(PauseReason::Meeting),
            "O" => Some(PauseReason::Other),
            _ => None,
        }
    }
}

/// One pause of a cabin session. `ended_at` is None while the pause is
/// still open; finish() force-closes whatever is left open.
#[derive(Debug, Clone, Serialize)]
pub struct PauseInterval {
    pub id: i64,
    pub ticket_id: i64,
    pub cabin: String,
    pub reason: String, // label, see PauseReason::label()
    pub note: String,   // free text, mandatory for "Outros"
    pub started_at: String,
    pub ended_at: Option<String>,
}

impl PauseInterval {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}
