pub mod leaderboards;
pub mod questions;
