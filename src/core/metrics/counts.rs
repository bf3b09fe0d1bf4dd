use crate::db::tickets::count_items_by_status;
use crate::errors::AppResult;
use crate::models::fleet_summary::StageCounts;
use crate::models::ticket_status::TicketStatus;
use rusqlite::Connection;

/// Item counts per lifecycle stage, one grouped scan of current rows.
pub fn stage_counts(conn: &Connection) -> AppResult<StageCounts> {
    let mut counts = StageCounts::default();

    for (status, n) in count_items_by_status(conn)? {
        match status {
            TicketStatus::AwaitingSampling => counts.awaiting_sampling = n,
            TicketStatus::InSampling => counts.in_sampling = n,
            TicketStatus::AwaitingWithdrawal => counts.awaiting_withdrawal = n,
            TicketStatus::Finalized => counts.finalized = n,
        }
    }

    Ok(counts)
}
