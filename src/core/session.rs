use crate::db::log::ntlog;
use crate::db::oee::{
    active_oee_for_cabin, close_oee, close_open_pauses, close_pause, flush_elapsed, insert_pause,
    load_pauses_for_run, open_pause_for_run, pause_totals_for_run,
};
use crate::db::pool::DbPool;
use crate::db::tickets::{finish_items, load_ticket};
use crate::errors::{AppError, AppResult};
use crate::models::oee::{OeeRecord, RunState};
use crate::models::pause::{PauseInterval, PauseReason};
use crate::models::session::{ActiveRun, CabinSession};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::format_seconds;
use rusqlite::Connection;

/// Per-cabin session tracker: pause / resume / finish plus the derived
/// run-state and elapsed-time view.
pub struct SessionLogic;

/// Net running seconds of a run, derived from wall-clock timestamps:
/// gross span minus every pause (open pauses count up to now).
///
/// Clamped below by the last flushed value so the counter never moves
/// backward while a session runs.
pub fn net_elapsed(oee: &OeeRecord, pauses: &[PauseInterval]) -> i64 {
    let gross = match date::seconds_since(&oee.started_at) {
        Some(g) => g,
        None => return oee.elapsed_seconds,
    };

    let mut paused = 0i64;
    for p in pauses {
        match &p.ended_at {
            Some(end) => paused += date::seconds_between(&p.started_at, end).unwrap_or(0),
            None => paused += date::seconds_since(&p.started_at).unwrap_or(0),
        }
    }

    (gross - paused).max(oee.elapsed_seconds).max(0)
}

impl SessionLogic {
    /// The cabin's active run with its pause log, if a ticket is claimed.
    pub fn load_active(conn: &Connection, cabin: &str) -> AppResult<Option<ActiveRun>> {
        let oee = match active_oee_for_cabin(conn, cabin)? {
            Some(rec) => rec,
            None => return Ok(None),
        };

        let pauses = load_pauses_for_run(conn, oee.ticket_id, cabin)?;
        Ok(Some(ActiveRun { oee, pauses }))
    }

    /// Derived snapshot of one cabin for `status` output.
    pub fn snapshot(conn: &Connection, cabin: &str) -> AppResult<CabinSession> {
        let run = match Self::load_active(conn, cabin)? {
            Some(run) => run,
            None => return Ok(CabinSession::awaiting(cabin)),
        };

        let state = if run.pauses.iter().any(|p| p.is_open()) {
            RunState::Paused
        } else {
            RunState::Running
        };

        let ticket_number = load_ticket(conn, run.oee.ticket_id)?.map(|t| t.number);

        Ok(CabinSession {
            cabin: cabin.to_string(),
            state,
            ticket_number,
            operator: Some(run.oee.operator.clone()),
            elapsed_seconds: net_elapsed(&run.oee, &run.pauses),
            pauses: run.pauses,
        })
    }

    /// Pause the cabin's running session with a reason from the fixed
    /// set (note mandatory for "Outros").
    pub fn pause(pool: &mut DbPool, cabin: &str, reason: PauseReason, note: &str) -> AppResult<()> {
        if reason == PauseReason::Other && note.trim().is_empty() {
            return Err(AppError::Validation(
                "Pause reason 'Outros' requires a --note.".into(),
            ));
        }

        let run = Self::load_active(&pool.conn, cabin)?
            .ok_or_else(|| AppError::Conflict(format!("{} has no active session.", cabin)))?;

        if run.pauses.iter().any(|p| p.is_open()) {
            return Err(AppError::Conflict(format!("{} is already paused.", cabin)));
        }

        let now = date::now_rfc3339();
        let elapsed = net_elapsed(&run.oee, &run.pauses);

        let tx = pool.conn.transaction()?;

        let interval = PauseInterval {
            id: 0,
            ticket_id: run.oee.ticket_id,
            cabin: cabin.to_string(),
            reason: reason.label().to_string(),
            note: note.trim().to_string(),
            started_at: now,
            ended_at: None,
        };
        insert_pause(&tx, &interval)?;

        // Flush the counter so a restart resumes from here.
        flush_elapsed(&tx, run.oee.id, elapsed)?;

        ntlog(
            &tx,
            "pause",
            &format!("oee_records:{}", cabin),
            &format!("Paused ({}) at {}", reason.label(), format_seconds(elapsed)),
        )?;

        tx.commit()?;

        success(format!(
            "{} paused — {}. Timer frozen at {}.",
            cabin,
            reason.label(),
            format_seconds(elapsed)
        ));

        Ok(())
    }

    /// Resume a paused session: closes the most recent open interval.
    pub fn resume(pool: &mut DbPool, cabin: &str) -> AppResult<()> {
        let run = Self::load_active(&pool.conn, cabin)?
            .ok_or_else(|| AppError::Conflict(format!("{} has no active session.", cabin)))?;

        let open = open_pause_for_run(&pool.conn, run.oee.ticket_id, cabin)?
            .ok_or_else(|| AppError::Conflict(format!("{} is not paused.", cabin)))?;

        let now = date::now_rfc3339();

        let tx = pool.conn.transaction()?;

        close_pause(&tx, open.id, &now)?;

        ntlog(
            &tx,
            "resume",
            &format!("oee_records:{}", cabin),
            &format!("Resumed after pause ({})", open.reason),
        )?;

        tx.commit()?;

        success(format!("{} resumed, timer running again.", cabin));

        Ok(())
    }

    /// Finish sampling: allowed while running or paused. Force-closes
    /// open pauses, advances the ticket's items, closes the OEE record
    /// with both the net and gross durations.
    pub fn finish(pool: &mut DbPool, cabin: &str) -> AppResult<()> {
        let run = Self::load_active(&pool.conn, cabin)?
            .ok_or_else(|| AppError::Conflict(format!("{} has no active session.", cabin)))?;

        let ticket = load_ticket(&pool.conn, run.oee.ticket_id)?
            .ok_or_else(|| AppError::TicketNotFound(format!("id {}", run.oee.ticket_id)))?;

        let now = date::now_rfc3339();

        let tx = pool.conn.transaction()?;

        // 1️⃣ Close whatever pause is still open
        close_open_pauses(&tx, run.oee.ticket_id, cabin, &now)?;

        // 2️⃣ Advance the items; zero affected rows means the DB no
        // longer matches this run → roll back, nothing half-finished.
        let affected = finish_items(&tx, run.oee.ticket_id, &now)?;
        if affected == 0 {
            return Err(AppError::Conflict(format!(
                "No item of ticket {} is being sampled; cannot finish.",
                ticket.number
            )));
        }

        // 3️⃣ Close the OEE record: gross span and net running time
        let total = date::seconds_between(&run.oee.started_at, &now).unwrap_or(0);
        let (_, paused_sum, _) = pause_totals_for_run(&tx, run.oee.ticket_id, cabin)?;
        let elapsed = (total - paused_sum).max(run.oee.elapsed_seconds).max(0);

        close_oee(&tx, run.oee.id, &now, elapsed, total)?;

        ntlog(
            &tx,
            "finish",
            &format!("tickets:{}", ticket.number),
            &format!(
                "Sampling finished by {} — {} net / {} gross",
                cabin,
                format_seconds(elapsed),
                format_seconds(total)
            ),
        )?;

        tx.commit()?;

        success(format!(
            "Ticket {} finished by {} ({} net running time), awaiting withdrawal.",
            ticket.number,
            cabin,
            format_seconds(elapsed)
        ));

        Ok(())
    }
}
