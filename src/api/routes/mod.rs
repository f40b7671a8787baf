pub mod contests;
pub mod exam;
pub mod health;
pub mod leaderboard;
