//! Integration tests for the pizza CLI.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pizza-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `config_accessor` - Key/value access through the public `pizza-core` API
//! - `config_file` - Compatibility with config files written by earlier versions
//!
//! This crate only holds shared fixtures.

use pizza_core::Config;

/// A config file as an earlier version of the tool wrote it, CVV included.
pub const LEGACY_CONFIG_JSON: &str = r#"{
    "name": "joe",
    "email": "nojoe@mail.com",
    "address": {
        "street": "1600 Pennsylvania Ave NW",
        "cityName": "Washington DC",
        "state": "",
        "zipcode": "20500"
    },
    "card": {
        "number": "4111111111111111",
        "expiration": "01/30",
        "cvv": "123"
    },
    "service": "Carryout"
}"#;

/// A fully populated profile built through the accessor.
///
/// # Panics
///
/// Panics if one of the fixed assignments is rejected.
#[must_use]
pub fn joe() -> Config {
    let mut config = Config::default();
    config
        .set_many(&[
            "name=joe",
            "email=nojoe@mail.com",
            "address.street=1600 Pennsylvania Ave NW",
            "address.cityname=Washington DC",
            "address.zipcode=20500",
            "card.number=4111111111111111",
            "card.expiration=01/30",
            "card.cvv=123",
            "service=Carryout",
        ])
        .unwrap_or_else(|e| panic!("fixture rejected: {e}"));
    config
}
