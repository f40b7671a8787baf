pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod models;
pub mod providers;
pub mod refresh;
pub mod repositories;
pub mod usecases;
