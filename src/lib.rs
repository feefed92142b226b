//! Tiered context - memory discovery and query keywords for coding agents.

pub mod config;
pub mod display;
pub mod hooks;
pub mod keywords;
pub mod memory;
