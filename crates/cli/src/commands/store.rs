//! Nearest-store command.
//!
//! # Usage
//!
//! ```bash
//! # Use the address and service method from the config file
//! pizza store
//!
//! # Look somewhere else, for carryout
//! pizza store --street "1600 Pennsylvania Ave NW" --city "Washington DC" --zip 20500 --service carryout
//! ```

use std::io::Write;

use pizza_core::{Address, Config, ServiceMethod};

use crate::error::CliError;
use crate::resolver::{Builder, StoreFinder, StoreResolver};
use crate::vendor::StoreLocator;

/// Command-line overrides for the store lookup.
#[derive(Debug, Clone, Default)]
pub struct StoreOverrides {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub service: Option<ServiceMethod>,
}

impl StoreOverrides {
    /// The address given on the command line, if any address flag was used.
    ///
    /// Flags replace the configured address as a whole; fields without a flag
    /// are left empty.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        if self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none() {
            return None;
        }
        Some(Address {
            street: self.street.clone().unwrap_or_default(),
            city_name: self.city.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            zipcode: self.zip.clone().unwrap_or_default(),
        })
    }
}

/// The profile plus whatever address the command line supplied.
struct Session<'a> {
    config: &'a Config,
    address: Option<Address>,
}

impl Builder for Session<'_> {
    fn config(&self) -> &Config {
        self.config
    }

    fn address(&self) -> Address {
        self.address
            .clone()
            .unwrap_or_else(|| self.config.address.clone())
    }
}

/// Find and print the store nearest to the effective address.
///
/// # Errors
///
/// Returns a fatal error if there is no address or the lookup fails.
pub async fn show<L: StoreLocator>(
    config: &Config,
    overrides: &StoreOverrides,
    locator: L,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let session = Session {
        config,
        address: overrides.address(),
    };

    match overrides.service {
        Some(service) => {
            let mut finder = StoreResolver::from_fns(move || service, || session.address(), locator);
            print_store(&mut finder, out).await
        }
        None => {
            let mut finder = StoreResolver::from_builder(&session, locator);
            print_store(&mut finder, out).await
        }
    }
}

async fn print_store(finder: &mut impl StoreFinder, out: &mut impl Write) -> Result<(), CliError> {
    let store = finder.store().await?;
    writeln!(out, "{store}")?;
    Ok(())
}
