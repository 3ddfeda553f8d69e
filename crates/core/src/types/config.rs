//! The user's persisted ordering profile.

use serde::{Deserialize, Serialize};

use super::{Address, Card, ServiceMethod};

/// User configuration: who is ordering, where to, how to pay, and how the
/// order is fulfilled.
///
/// One instance is live per process. It is built in `main`, handed to each
/// command, and written back to disk when a command changed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub card: Card,
    #[serde(default)]
    pub service: ServiceMethod,
}
