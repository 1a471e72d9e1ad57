pub mod jobs;
pub mod logs;
pub mod players;
