//! Fulfillment mode selector.

use serde::{Deserialize, Serialize};

/// How an order reaches the customer.
///
/// Serialized with the vendor's spelling (`"Delivery"`, `"Carryout"`), which is
/// also the value of the store locator's `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceMethod {
    #[default]
    Delivery,
    Carryout,
}

impl ServiceMethod {
    /// The vendor API spelling of this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "Delivery",
            Self::Carryout => "Carryout",
        }
    }
}

impl std::fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delivery" => Ok(Self::Delivery),
            "carryout" => Ok(Self::Carryout),
            _ => Err(format!(
                "invalid service method: {s} (use Delivery or Carryout)"
            )),
        }
    }
}
