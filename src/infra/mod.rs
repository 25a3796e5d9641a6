pub mod actions;
pub mod github;
