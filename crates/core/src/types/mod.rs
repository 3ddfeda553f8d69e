//! Core types for the pizza CLI.
//!
//! This module provides the configuration record and the value types it is
//! built from.

pub mod address;
pub mod card;
pub mod config;
pub mod email;
pub mod service;
pub mod store;

pub use address::Address;
pub use card::Card;
pub use config::Config;
pub use email::{Email, EmailError};
pub use service::ServiceMethod;
pub use store::Store;
