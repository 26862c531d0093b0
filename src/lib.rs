pub mod client;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod mirror;
pub mod models;
pub mod services;
pub mod transport;

pub use client::DungeonVaultClient;
pub use config::Config;
pub use error::ApiError;
