pub mod init;
pub mod manager;
pub mod types;
