pub mod config;
pub mod lab;
pub mod summary;
pub mod types;
