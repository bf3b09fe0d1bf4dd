// src/export/mod.rs

mod fs_utils;
pub mod logic;
mod model;
mod range;
mod xlsx;

mod json_csv;

pub use logic::ExportLogic;
pub use model::{HistoryExport, OeeExport, TicketExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Which dataset to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Tickets,
    History,
    Oee,
}

impl ExportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Tickets => "tickets",
            ExportKind::History => "history",
            ExportKind::Oee => "oee",
        }
    }
}
