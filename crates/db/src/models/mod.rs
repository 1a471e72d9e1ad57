//! Row structs for the game server's tables.
//!
//! Each submodule maps a table's rows and converts them into the
//! `playerdesk-core` record types the services work with.

pub mod event_log;
pub mod job;
pub mod player;
