//! Domain layer for the player admin backend.
//!
//! Holds the character/job data model, the JSON column codec, the store
//! capability traits and the services built on them. Nothing here talks to
//! a database directly; `playerdesk-db` supplies the MySQL store.

pub mod assignment;
pub mod error;
pub mod job;
pub mod logs;
pub mod memory;
pub mod normalize;
pub mod player;
pub mod store;
pub mod types;
