//! Payment card details.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Payment card used to pay for an order.
///
/// The CVV lives only in memory: it is skipped by serde, so it never reaches
/// the config file or the edit buffer. Implements `Debug` manually to redact it.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiration: String,
    #[serde(skip)]
    cvv: Option<SecretString>,
}

impl Card {
    /// Returns the CVV, or an empty string when none is set.
    #[must_use]
    pub fn cvv(&self) -> &str {
        self.cvv.as_ref().map_or("", |cvv| cvv.expose_secret())
    }

    /// Replaces the CVV. An empty value clears it.
    pub fn set_cvv(&mut self, cvv: &str) {
        self.cvv = (!cvv.is_empty()).then(|| SecretString::from(cvv));
    }

    /// Returns true when a CVV is held in memory.
    #[must_use]
    pub const fn has_cvv(&self) -> bool {
        self.cvv.is_some()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.expiration == other.expiration
            && self.cvv() == other.cvv()
    }
}

impl Eq for Card {}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.number)
            .field("expiration", &self.expiration)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cvv_is_not_serialized() {
        let mut card = Card {
            number: "4111111111111111".to_string(),
            expiration: "01/30".to_string(),
            ..Card::default()
        };
        card.set_cvv("123");

        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("123\""));
        assert!(!json.contains("cvv"));

        let parsed: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.number, card.number);
        assert!(!parsed.has_cvv());
    }

    #[test]
    fn test_debug_redacts_cvv() {
        let mut card = Card::default();
        card.set_cvv("987");

        let debug_output = format!("{card:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("987"));
    }

    #[test]
    fn test_empty_cvv_clears() {
        let mut card = Card::default();
        card.set_cvv("123");
        assert_eq!(card.cvv(), "123");
        card.set_cvv("");
        assert!(!card.has_cvv());
        assert_eq!(card.cvv(), "");
    }
}
