pub mod config;
pub mod directories;
pub mod label;
