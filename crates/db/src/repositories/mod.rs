//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&MySqlPool` as the first argument.

pub mod event_log_repo;
pub mod job_repo;
pub mod player_repo;

pub use event_log_repo::EventLogRepo;
pub use job_repo::JobRepo;
pub use player_repo::PlayerRepo;
