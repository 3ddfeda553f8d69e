//! Lazy, memoizing nearest-store lookup.
//!
//! Commands that need a store embed a [`StoreResolver`] and call
//! [`StoreFinder::store`] when they actually need it. The first call performs
//! the vendor lookup; every later call returns the same handle. The handle is
//! never refreshed for the lifetime of the resolver.
//!
//! Failures here are fatal: with no usable address, or a failed lookup, no
//! command has anything sensible left to do. The resolver reports them as
//! [`CliError::Fatal`] and `main` ends the process.

use pizza_core::{Address, Config, ServiceMethod, Store};
use tracing::debug;

use crate::error::CliError;
use crate::vendor::StoreLocator;

/// Ability to produce the nearest store.
pub trait StoreFinder {
    /// Return the nearest store, looking it up on first use.
    async fn store(&mut self) -> Result<&Store, CliError>;
}

/// Source of the configuration and the effective address.
///
/// The address may differ from `config().address` when command-line flags
/// override it.
pub trait Builder {
    fn config(&self) -> &Config;
    fn address(&self) -> Address;
}

type ServiceFn<'a> = Box<dyn Fn() -> ServiceMethod + 'a>;
type AddressFn<'a> = Box<dyn Fn() -> Address + 'a>;

/// [`StoreFinder`] that asks `locator` once and caches the answer.
///
/// Not thread-safe; the CLI drives it from a single task.
pub struct StoreResolver<'a, L> {
    service: ServiceFn<'a>,
    address: AddressFn<'a>,
    locator: L,
    cached: Option<Store>,
}

impl<'a, L: StoreLocator> StoreResolver<'a, L> {
    /// Resolve using the builder's address and its configured service method.
    pub fn from_builder<B: Builder>(builder: &'a B, locator: L) -> Self {
        Self::from_fns(
            move || builder.config().service,
            move || builder.address(),
            locator,
        )
    }

    /// Resolve using two deferred accessors, evaluated on the first lookup.
    pub fn from_fns(
        service: impl Fn() -> ServiceMethod + 'a,
        address: impl Fn() -> Address + 'a,
        locator: L,
    ) -> Self {
        Self {
            service: Box::new(service),
            address: Box::new(address),
            locator,
            cached: None,
        }
    }

    async fn lookup(&self) -> Result<Store, CliError> {
        let address = (self.address)();
        if address.is_empty() {
            return Err(CliError::fatal(
                "Error",
                "no address given in config file or as flag",
            ));
        }

        let service = (self.service)();
        debug!(%address, %service, "Resolving nearest store");
        self.locator
            .nearest_store(&address, service)
            .await
            .map_err(|e| CliError::fatal("Store Find Error", e.to_string()))
    }
}

impl<L: StoreLocator> StoreFinder for StoreResolver<'_, L> {
    async fn store(&mut self) -> Result<&Store, CliError> {
        let store = match self.cached.take() {
            Some(store) => store,
            None => self.lookup().await?,
        };
        Ok(&*self.cached.insert(store))
    }
}
