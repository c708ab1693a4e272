//! Subcommand groups, one leaf per remote operation.

pub mod admin;
pub mod auth;
pub mod events;
pub mod profile;
pub mod session;
