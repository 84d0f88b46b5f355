/// Commentary on the current ledger.
pub mod commentary_service;
/// Timetable editing.
pub mod schedule_service;
/// Ledger operations and their persistence.
pub mod scorekeeper;
