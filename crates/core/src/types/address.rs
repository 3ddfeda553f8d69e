//! Street address used for store lookup and delivery.

use serde::{Deserialize, Serialize};

/// A postal address.
///
/// The field names follow the persisted config file, which stores the city
/// under `cityName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default, rename = "cityName")]
    pub city_name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
}

impl Address {
    /// Returns true when every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.street, &self.city_name, &self.state, &self.zipcode]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    /// First address line, as sent to the store locator.
    #[must_use]
    pub fn line1(&self) -> &str {
        self.street.trim()
    }

    /// Second address line: `"city, state zip"`, skipping blank parts.
    #[must_use]
    pub fn line2(&self) -> String {
        let region = [self.state.trim(), self.zipcode.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match (self.city_name.trim(), region.is_empty()) {
            ("", _) => region,
            (city, true) => city.to_owned(),
            (city, false) => format!("{city}, {region}"),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line1(), self.line2()) {
            ("", line2) => f.write_str(&line2),
            (line1, line2) if line2.is_empty() => f.write_str(line1),
            (line1, line2) => write!(f, "{line1}, {line2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_house() -> Address {
        Address {
            street: "1600 Pennsylvania Ave NW".to_string(),
            city_name: "Washington DC".to_string(),
            state: String::new(),
            zipcode: "20500".to_string(),
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(Address::default().is_empty());
        assert!(
            Address {
                street: "  ".to_string(),
                ..Address::default()
            }
            .is_empty()
        );
        assert!(!white_house().is_empty());
    }

    #[test]
    fn test_lines() {
        let addr = white_house();
        assert_eq!(addr.line1(), "1600 Pennsylvania Ave NW");
        assert_eq!(addr.line2(), "Washington DC, 20500");
        assert_eq!(
            addr.to_string(),
            "1600 Pennsylvania Ave NW, Washington DC, 20500"
        );
    }

    #[test]
    fn test_line2_without_city() {
        let addr = Address {
            state: "DC".to_string(),
            zipcode: "20500".to_string(),
            ..Address::default()
        };
        assert_eq!(addr.line2(), "DC 20500");
        assert_eq!(addr.to_string(), "DC 20500");
    }

    #[test]
    fn test_city_name_serializes_camel_case() {
        let json = serde_json::to_value(white_house()).unwrap_or_default();
        assert_eq!(json["cityName"], "Washington DC");
    }
}
