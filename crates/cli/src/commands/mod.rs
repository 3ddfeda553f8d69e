//! Subcommand implementations.
//!
//! Each command takes the live [`pizza_core::Config`] explicitly and writes
//! its output to a caller-supplied writer, so `main` owns stdout and the
//! decision to exit.

pub mod config;
pub mod store;
