use serde::Serialize;

/// Lifecycle stage of a line item (and, by mirroring, of its ticket).
/// The sequence is linear: items never move backward.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TicketStatus {
    AwaitingSampling,
    InSampling,
    AwaitingWithdrawal,
    Finalized,
}

impl TicketStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TicketStatus::AwaitingSampling => "awaiting_sampling",
            TicketStatus::InSampling => "in_sampling",
            TicketStatus::AwaitingWithdrawal => "awaiting_withdrawal",
            TicketStatus::Finalized => "finalized",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "awaiting_sampling" => Some(TicketStatus::AwaitingSampling),
            "in_sampling" => Some(TicketStatus::InSampling),
            "awaiting_withdrawal" => Some(TicketStatus::AwaitingWithdrawal),
            "finalized" => Some(TicketStatus::Finalized),
            _ => None,
        }
    }

    /// Helper: parse CLI filter values (`awaiting`, `sampling`, `baixa`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "awaiting" | "awaiting-sampling" => Some(TicketStatus::AwaitingSampling),
            "sampling" | "in-sampling" => Some(TicketStatus::InSampling),
            "withdrawal" | "awaiting-withdrawal" | "baixa" => Some(TicketStatus::AwaitingWithdrawal),
            "finalized" | "done" => Some(TicketStatus::Finalized),
            _ => None,
        }
    }

    /// Human-readable label for tables and messages.
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::AwaitingSampling => "Ag. Amostragem",
            TicketStatus::InSampling => "Em Amostragem",
            TicketStatus::AwaitingWithdrawal => "Ag. Baixa",
            TicketStatus::Finalized => "Finalizado",
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, TicketStatus::AwaitingSampling)
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, TicketStatus::Finalized)
    }
}
