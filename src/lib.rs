pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod ports;
pub mod protocol;
pub mod server;
pub mod telemetry;
