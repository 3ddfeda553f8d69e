//! Vendor storefront handle.

use serde::{Deserialize, Serialize};

/// A storefront able to fulfil an order, as returned by the store locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Vendor store identifier; orders are placed against it.
    pub id: String,
    /// Human-readable street address of the store.
    pub address: String,
    pub phone: String,
    pub is_delivery_store: bool,
    pub is_open: bool,
    /// Distance from the customer in miles, when the vendor reports it.
    pub min_distance: Option<f64>,
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store {}", self.id)?;
        writeln!(f, "  address: {}", self.address.replace('\n', ", "))?;
        writeln!(f, "  phone: {}", self.phone)?;
        if let Some(miles) = self.min_distance {
            writeln!(f, "  distance: {miles:.1} mi")?;
        }
        write!(f, "  open: {}", if self.is_open { "yes" } else { "no" })
    }
}
