pub mod cli;
pub mod error;
pub mod github;
pub mod health;
pub mod links;
pub mod models;
pub mod pagination;
pub mod server;
pub mod types;
