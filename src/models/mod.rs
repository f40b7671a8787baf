pub mod contest;
pub mod leaderboard;
pub mod question;
pub mod stats;
