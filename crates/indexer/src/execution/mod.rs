pub mod config;
pub mod executor;
pub mod registry;
