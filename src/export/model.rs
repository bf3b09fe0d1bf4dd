// src/export/model.rs

use serde::Serialize;

/// Flat row for ticket/item export: one line per line item.
#[derive(Serialize, Clone, Debug)]
pub struct TicketExport {
    pub ticket: String,
    pub created_at: String,
    pub code: String,
    pub description: String,
    pub quantity: f64,
    pub batch: String,
    pub status: String,
    pub cabin: String,
    pub sample_started_at: String,
    pub sample_finished_at: String,
}

/// Flat row for withdrawal history export.
#[derive(Serialize, Clone, Debug)]
pub struct HistoryExport {
    pub ticket: String,
    pub sampling_type: String,
    pub withdrawn_at: String,
    pub notes: String,
}

/// Flat row for OEE record export.
#[derive(Serialize, Clone, Debug)]
pub struct OeeExport {
    pub ticket: String,
    pub cabin: String,
    pub operator: String,
    pub started_at: String,
    pub ended_at: String,
    pub elapsed_seconds: i64,
    pub total_seconds: i64,
    pub status: String,
}

pub(crate) fn ticket_headers() -> Vec<&'static str> {
    vec![
        "ticket",
        "created_at",
        "code",
        "description",
        "quantity",
        "batch",
        "status",
        "cabin",
        "sample_started_at",
        "sample_finished_at",
    ]
}

pub(crate) fn history_headers() -> Vec<&'static str> {
    vec!["ticket", "sampling_type", "withdrawn_at", "notes"]
}

pub(crate) fn oee_headers() -> Vec<&'static str> {
    vec![
        "ticket",
        "cabin",
        "operator",
        "started_at",
        "ended_at",
        "elapsed_seconds",
        "total_seconds",
        "status",
    ]
}

pub(crate) fn ticket_to_row(e: &TicketExport) -> Vec<String> {
    vec![
        e.ticket.clone(),
        e.created_at.clone(),
        e.code.clone(),
        e.description.clone(),
        e.quantity.to_string(),
        e.batch.clone(),
        e.status.clone(),
        e.cabin.clone(),
        e.sample_started_at.clone(),
        e.sample_finished_at.clone(),
    ]
}

pub(crate) fn history_to_row(e: &HistoryExport) -> Vec<String> {
    vec![
        e.ticket.clone(),
        e.sampling_type.clone(),
        e.withdrawn_at.clone(),
        e.notes.clone(),
    ]
}

pub(crate) fn oee_to_row(e: &OeeExport) -> Vec<String> {
    vec![
        e.ticket.clone(),
        e.cabin.clone(),
        e.operator.clone(),
        e.started_at.clone(),
        e.ended_at.clone(),
        e.elapsed_seconds.to_string(),
        e.total_seconds.to_string(),
        e.status.clone(),
    ]
}
