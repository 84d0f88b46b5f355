//! Score ledger for four-player Gong Zhu (Chase the Pig) tables, with local persistence,
//! optional generated commentary, and a small class timetable.

pub mod commentary;
pub mod config;
pub mod dao;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;
