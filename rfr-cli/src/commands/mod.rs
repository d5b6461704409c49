//! CLI command implementations

pub mod action;
pub mod config;

pub use action::ActionArgs;
pub use config::ConfigArgs;
