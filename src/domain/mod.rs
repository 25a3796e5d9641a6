pub mod change;
pub mod directory;
pub mod label;
pub mod pull_request;
