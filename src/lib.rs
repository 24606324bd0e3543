pub mod analytics;
pub mod auth;
pub mod clients;
pub mod config;
pub mod relay;
pub mod serve;
pub mod state;
pub mod users;
