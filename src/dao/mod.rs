/// API credential storage.
pub mod credentials;
/// Key-value backends and JSON helpers.
pub mod kv;
/// Ledger persistence (players and rounds).
pub mod ledger_store;
/// Persisted entity definitions.
pub mod models;
/// Timetable persistence.
pub mod schedule_store;
/// Storage error types.
pub mod storage;
