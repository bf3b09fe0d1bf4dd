use super::ticket_status::TicketStatus;
use chrono::Local;
use serde::Serialize;

/// A work ticket (NT): one batch of materials scheduled for sampling.
/// Owns 1..N line items created together with it.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: i64,
    pub number: String,     // ⇔ tickets.number (TEXT, unique, e.g. "NT-1001")
    pub created_at: String, // ⇔ tickets.created_at (TEXT, ISO8601)
}

impl Ticket {
    pub fn new(id: i64, number: &str) -> Self {
        Self {
            id,
            number: number.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}

/// One material line of a ticket.
/// While in flight, all items of a ticket share the same status and cabin.
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub id: i64,
    pub ticket_id: i64,
    pub code: String,               // ⇔ line_items.code (e.g. "MP01")
    pub description: String,        // free text
    pub quantity: f64,              // decimal, strictly positive
    pub batch: String,              // ⇔ line_items.batch (e.g. "L001")
    pub status: TicketStatus,       // mirrors the ticket's stage
    pub cabin: String,              // empty until claimed
    pub sample_started_at: String,  // empty until claimed
    pub sample_finished_at: String, // empty until sampling finishes
}

impl LineItem {
    pub fn new(ticket_id: i64, code: &str, description: &str, quantity: f64, batch: &str) -> Self {
        Self {
            id: 0,
            ticket_id,
            code: code.to_string(),
            description: description.to_string(),
            quantity,
            batch: batch.to_string(),
            status: TicketStatus::AwaitingSampling,
            cabin: String::new(),
            sample_started_at: String::new(),
            sample_finished_at: String::new(),
        }
    }
}

/// Input payload for one line item, as parsed from the CLI
/// (`--item CODE:DESCRIPTION:QTY:BATCH`).
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub code: String,
    pub description: String,
    pub quantity: f64,
    pub batch: String,
}
