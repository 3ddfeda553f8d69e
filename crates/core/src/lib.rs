//! Pizza Core - Shared types library.
//!
//! This crate provides the types used by the `pizza` command-line client:
//! the user's configuration record, the store handle returned by the vendor's
//! store locator, and the key/value accessor the `config` subcommands use.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no file access, no
//! HTTP clients, no process control. Persistence, the vendor API and the
//! editor live in the CLI crate.
//!
//! # Modules
//!
//! - [`types`] - Configuration record, address, card, service method, store
//! - [`accessor`] - Case-insensitive get/set by key and the redacted listing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accessor;
pub mod types;

pub use accessor::{AccessError, ConfigKey, FieldValue, parse_assignment};
pub use types::*;
