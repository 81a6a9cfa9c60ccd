pub mod analytics;
pub mod common;
pub mod config;
pub mod data_loader;
pub mod errors;
pub mod export;
pub mod generate_commands;
pub mod pipeline;
pub mod plan_execution;
pub mod records;

#[cfg(feature = "server")]
pub mod server;
