//! Shared types for the pomod daemon, its face and its control CLI.

pub mod config;
pub mod ipc;
pub mod phase;
pub mod theme;
