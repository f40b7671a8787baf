pub mod contests;
pub mod exam;
pub mod leaderboards;
pub mod previous_year;
pub mod ranking;
