//! CLI command implementations.

pub mod config;
pub mod data;
pub mod info;
pub mod property;
pub mod resources;
pub mod validate;
