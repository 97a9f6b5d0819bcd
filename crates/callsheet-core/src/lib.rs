//! Core domain for callsheet: team and opponent manifests, terminology,
//! scouting reports, play pools and their regeneration, session context,
//! and the multi-step operation journal. Everything persists as YAML under
//! a `.callsheet/` directory except the journal, which lives in redb.

pub mod config;
pub mod error;
pub mod help;
pub mod io;
pub mod journal;
pub mod opponent;
pub mod paths;
pub mod playpool;
pub mod scouting;
pub mod selector;
pub mod session;
pub mod team;
pub mod terminology;
pub mod types;
pub mod workspace;

pub use error::{CallsheetError, Result};
