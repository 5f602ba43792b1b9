pub mod config;
pub mod repo;
