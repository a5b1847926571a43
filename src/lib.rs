pub mod access;
pub mod analytics;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod sla;
pub mod types;

#[cfg(test)]
pub mod testing;
