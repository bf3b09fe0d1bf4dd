pub mod fleet_summary;
pub mod history;
pub mod oee;
pub mod pause;
pub mod session;
pub mod ticket;
pub mod ticket_status;
