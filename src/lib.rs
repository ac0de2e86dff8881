pub mod app;
pub mod cli;
pub mod database;
pub mod store;
pub mod types;
pub mod utils;
