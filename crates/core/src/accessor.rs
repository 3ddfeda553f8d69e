//! Key/value access to the configuration record.
//!
//! Commands address fields of [`Config`] by name. [`ConfigKey`] is the closed
//! set of names a user can type, parsed case-insensitively; nested fields are
//! reachable either dotted (`address.street`) or bare (`street`).
//!
//! ```
//! use pizza_core::{Config, FieldValue};
//!
//! let mut config = Config::default();
//! config.set("Name", "joe").unwrap();
//! assert_eq!(config.get("name").unwrap(), FieldValue::Text("joe"));
//! assert_eq!(config.get("colour").unwrap_err().to_string(), "cannot find colour");
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Config, Email, ServiceMethod};

/// Errors returned by key/value access. None of them leave the record changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No keys were supplied.
    #[error("no variable given")]
    NoVariable,

    /// The key does not name a field.
    #[error("cannot find {0}")]
    UnknownKey(String),

    /// A set argument was not of the form `key=value`.
    #[error("use '<key>=<value>' format (no spaces), use <key>='-' to set as empty")]
    BadAssignment,

    /// The value could not be coerced to the field's type.
    #[error("cannot set {key}: {reason}")]
    InvalidValue {
        /// Label of the field being set.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Every addressable field of [`Config`], in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Name,
    Email,
    Address,
    Street,
    CityName,
    State,
    Zipcode,
    Card,
    Number,
    Expiration,
    Cvv,
    Service,
}

impl ConfigKey {
    /// Top-level fields in declaration order.
    pub const TOP_LEVEL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Address,
        Self::Card,
        Self::Service,
    ];

    /// All keys, each section followed by its fields.
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::Email,
        Self::Address,
        Self::Street,
        Self::CityName,
        Self::State,
        Self::Zipcode,
        Self::Card,
        Self::Number,
        Self::Expiration,
        Self::Cvv,
        Self::Service,
    ];

    /// The label used in listings: the serialized field name, lower-cased.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::Street => "street",
            Self::CityName => "cityname",
            Self::State => "state",
            Self::Zipcode => "zipcode",
            Self::Card => "card",
            Self::Number => "number",
            Self::Expiration => "expiration",
            Self::Cvv => "cvv",
            Self::Service => "service",
        }
    }

    /// Nested fields of a section; empty for leaf fields.
    #[must_use]
    pub const fn fields(self) -> &'static [Self] {
        match self {
            Self::Address => &[Self::Street, Self::CityName, Self::State, Self::Zipcode],
            Self::Card => &[Self::Number, Self::Expiration, Self::Cvv],
            _ => &[],
        }
    }

    #[must_use]
    pub const fn is_section(self) -> bool {
        !self.fields().is_empty()
    }

    /// Fields left out of every rendering.
    #[must_use]
    pub const fn is_redacted(self) -> bool {
        matches!(self, Self::Cvv)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConfigKey {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "email" => Self::Email,
            "address" => Self::Address,
            "street" | "address.street" => Self::Street,
            "cityname" | "city" | "address.cityname" | "address.city" => Self::CityName,
            "state" | "address.state" => Self::State,
            "zipcode" | "zip" | "address.zipcode" | "address.zip" => Self::Zipcode,
            "card" => Self::Card,
            "number" | "card.number" => Self::Number,
            "expiration" | "card.expiration" => Self::Expiration,
            "cvv" | "card.cvv" => Self::Cvv,
            "service" => Self::Service,
            _ => return Err(AccessError::UnknownKey(s.to_owned())),
        };
        Ok(key)
    }
}

/// The value of one field, borrowed from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Service(ServiceMethod),
    /// A nested section; displays as one `label: "value"` line per field.
    Section {
        key: ConfigKey,
        config: &'a Config,
    },
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Text(text) => f.write_str(text),
            Self::Service(method) => f.write_str(method.as_str()),
            Self::Section { key, config } => {
                for (i, field) in visible(key.fields()).enumerate() {
                    if i > 0 {
                        f.write_char('\n')?;
                    }
                    write_entry(f, config, field, 0)?;
                }
                Ok(())
            }
        }
    }
}

/// Redacted listing of a whole record, one field per line.
///
/// Produced by [`Config::listing`].
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a>(&'a Config);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in visible(&ConfigKey::TOP_LEVEL) {
            write_entry(f, self.0, key, 0)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

fn visible(keys: &[ConfigKey]) -> impl Iterator<Item = ConfigKey> + '_ {
    keys.iter().copied().filter(|key| !key.is_redacted())
}

fn write_entry(
    f: &mut impl fmt::Write,
    config: &Config,
    key: ConfigKey,
    depth: usize,
) -> fmt::Result {
    let indent = depth * 2;
    write!(f, "{:indent$}{}:", "", key.label())?;
    match config.field(key) {
        FieldValue::Text(text) => write!(f, " {text:?}"),
        FieldValue::Service(method) => write!(f, " {:?}", method.as_str()),
        FieldValue::Section { .. } => {
            for field in visible(key.fields()) {
                f.write_char('\n')?;
                write_entry(f, config, field, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// Split a `key=value` argument. A value of `-` stands for the empty string.
///
/// # Errors
///
/// Returns [`AccessError::BadAssignment`] when there is no `=`, no key, or
/// no value.
pub fn parse_assignment(arg: &str) -> Result<(&str, &str), AccessError> {
    let (key, value) = arg.split_once('=').ok_or(AccessError::BadAssignment)?;
    if key.is_empty() || value.is_empty() {
        return Err(AccessError::BadAssignment);
    }
    Ok((key, if value == "-" { "" } else { value }))
}

impl Config {
    /// Look up a field by typed key.
    #[must_use]
    pub fn field(&self, key: ConfigKey) -> FieldValue<'_> {
        match key {
            ConfigKey::Name => FieldValue::Text(&self.name),
            ConfigKey::Email => FieldValue::Text(&self.email),
            ConfigKey::Street => FieldValue::Text(&self.address.street),
            ConfigKey::CityName => FieldValue::Text(&self.address.city_name),
            ConfigKey::State => FieldValue::Text(&self.address.state),
            ConfigKey::Zipcode => FieldValue::Text(&self.address.zipcode),
            ConfigKey::Number => FieldValue::Text(&self.card.number),
            ConfigKey::Expiration => FieldValue::Text(&self.card.expiration),
            ConfigKey::Cvv => FieldValue::Text(self.card.cvv()),
            ConfigKey::Service => FieldValue::Service(self.service),
            ConfigKey::Address | ConfigKey::Card => FieldValue::Section { key, config: self },
        }
    }

    /// Look up a field by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownKey`] if the name matches no field.
    pub fn get(&self, key: &str) -> Result<FieldValue<'_>, AccessError> {
        Ok(self.field(key.parse()?))
    }

    /// Look up several fields at once.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoVariable`] for an empty key list, or the first
    /// lookup error.
    pub fn get_many<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<FieldValue<'_>>, AccessError> {
        if keys.is_empty() {
            return Err(AccessError::NoVariable);
        }
        keys.iter().map(|key| self.get(key.as_ref())).collect()
    }

    /// Assign a field by typed key, coercing the value to the field's type.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidValue`] if the value does not fit the
    /// field, or if the key names a section. The record is unchanged on error.
    pub fn set_field(&mut self, key: ConfigKey, value: &str) -> Result<(), AccessError> {
        let invalid = |reason: String| AccessError::InvalidValue {
            key: key.label(),
            reason,
        };

        match key {
            ConfigKey::Name => value.clone_into(&mut self.name),
            ConfigKey::Email => {
                if !value.is_empty() {
                    Email::parse(value).map_err(|e| invalid(e.to_string()))?;
                }
                value.clone_into(&mut self.email);
            }
            ConfigKey::Street => value.clone_into(&mut self.address.street),
            ConfigKey::CityName => value.clone_into(&mut self.address.city_name),
            ConfigKey::State => value.clone_into(&mut self.address.state),
            ConfigKey::Zipcode => value.clone_into(&mut self.address.zipcode),
            ConfigKey::Number => value.clone_into(&mut self.card.number),
            ConfigKey::Expiration => value.clone_into(&mut self.card.expiration),
            ConfigKey::Cvv => {
                let digits = value.bytes().all(|b| b.is_ascii_digit());
                if !value.is_empty() && !(digits && matches!(value.len(), 3 | 4)) {
                    return Err(invalid("must be 3 or 4 digits".to_string()));
                }
                self.card.set_cvv(value);
            }
            ConfigKey::Service => self.service = value.parse().map_err(invalid)?,
            ConfigKey::Address | ConfigKey::Card => {
                return Err(invalid(format!(
                    "{key} is a section, set one of its fields instead"
                )));
            }
        }
        Ok(())
    }

    /// Assign a field by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownKey`] for an unknown name, otherwise as
    /// [`Config::set_field`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), AccessError> {
        self.set_field(key.parse()?, value)
    }

    /// Apply `key=value` assignments, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoVariable`] for an empty list, or the first
    /// parse or assignment error; in every error case the record is unchanged.
    pub fn set_many<S: AsRef<str>>(&mut self, assignments: &[S]) -> Result<(), AccessError> {
        if assignments.is_empty() {
            return Err(AccessError::NoVariable);
        }

        let mut staged = self.clone();
        for arg in assignments {
            let (key, value) = parse_assignment(arg.as_ref())?;
            staged.set(key, value)?;
        }
        *self = staged;
        Ok(())
    }

    /// Redacted, declaration-ordered rendering of every field.
    #[must_use]
    pub const fn listing(&self) -> Listing<'_> {
        Listing(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Address;

    const LISTING: &str = r#"name: "joe"
email: "nojoe@mail.com"
address:
  street: "1600 Pennsylvania Ave NW"
  cityname: "Washington DC"
  state: ""
  zipcode: "20500"
card:
  number: ""
  expiration: ""
service: "Carryout"
"#;

    fn joe() -> Config {
        Config {
            name: "joe".to_string(),
            email: "nojoe@mail.com".to_string(),
            address: Address {
                street: "1600 Pennsylvania Ave NW".to_string(),
                city_name: "Washington DC".to_string(),
                state: String::new(),
                zipcode: "20500".to_string(),
            },
            service: ServiceMethod::Carryout,
            ..Config::default()
        }
    }

    #[test]
    fn test_key_parsing_is_case_insensitive() {
        assert_eq!("Name".parse::<ConfigKey>().unwrap(), ConfigKey::Name);
        assert_eq!("NAME".parse::<ConfigKey>().unwrap(), ConfigKey::Name);
        assert_eq!(
            "Address.CityName".parse::<ConfigKey>().unwrap(),
            ConfigKey::CityName
        );
        assert_eq!("zip".parse::<ConfigKey>().unwrap(), ConfigKey::Zipcode);
        assert_eq!("card.CVV".parse::<ConfigKey>().unwrap(), ConfigKey::Cvv);
    }

    #[test]
    fn test_key_rejects_wrong_section() {
        assert_eq!(
            "card.street".parse::<ConfigKey>(),
            Err(AccessError::UnknownKey("card.street".to_string()))
        );
    }

    #[test]
    fn test_every_key_parses_from_its_label() {
        for key in ConfigKey::ALL {
            assert_eq!(key.label().parse::<ConfigKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_set_then_get_with_different_case() {
        let mut config = joe();
        config.set("name", "not joe").unwrap();
        assert_eq!(config.get("Name").unwrap(), FieldValue::Text("not joe"));
        config.set("name", "joe").unwrap();
        assert_eq!(config, joe());
    }

    #[test]
    fn test_get_then_set_same_value_is_idempotent() {
        let mut config = joe();
        config.set("cvv", "123").unwrap();

        for key in ConfigKey::ALL.into_iter().filter(|k| !k.is_section()) {
            let before = config.field(key).to_string();
            config.set_field(key, &before).unwrap();
            assert_eq!(config.field(key).to_string(), before, "key {key}");
        }
        assert_eq!(config.card.cvv(), "123");
    }

    #[test]
    fn test_get_unknown_key() {
        let err = joe().get("nonExistantKey").unwrap_err();
        assert_eq!(err.to_string(), "cannot find nonExistantKey");
    }

    #[test]
    fn test_get_many() {
        let config = joe();
        let values = config.get_many(&["email", "name"]).unwrap();
        assert_eq!(
            values,
            vec![FieldValue::Text("nojoe@mail.com"), FieldValue::Text("joe")]
        );

        let none: &[&str] = &[];
        assert_eq!(
            config.get_many(none).unwrap_err().to_string(),
            "no variable given"
        );
    }

    #[test]
    fn test_get_section_renders_its_fields() {
        let config = joe();
        assert_eq!(
            config.get("address").unwrap().to_string(),
            "street: \"1600 Pennsylvania Ave NW\"\ncityname: \"Washington DC\"\nstate: \"\"\nzipcode: \"20500\""
        );
        assert_eq!(
            config.get("card").unwrap().to_string(),
            "number: \"\"\nexpiration: \"\""
        );
    }

    #[test]
    fn test_set_coerces_service() {
        let mut config = joe();
        config.set("service", "delivery").unwrap();
        assert_eq!(config.service, ServiceMethod::Delivery);
        assert_eq!(config.get("SERVICE").unwrap().to_string(), "Delivery");

        let err = config.set("service", "drone").unwrap_err();
        assert!(matches!(err, AccessError::InvalidValue { key: "service", .. }));
        assert!(config.set("service", "").is_err());
        assert_eq!(config.service, ServiceMethod::Delivery);
    }

    #[test]
    fn test_set_validates_email() {
        let mut config = joe();
        assert!(config.set("email", "not-an-email").is_err());
        assert_eq!(config.email, "nojoe@mail.com");
        config.set("email", "").unwrap();
        assert_eq!(config.email, "");
    }

    #[test]
    fn test_set_validates_cvv() {
        let mut config = joe();
        assert!(config.set("cvv", "12").is_err());
        assert!(config.set("cvv", "12a").is_err());
        config.set("card.cvv", "1234").unwrap();
        assert_eq!(config.card.cvv(), "1234");
    }

    #[test]
    fn test_set_section_is_rejected() {
        let mut config = joe();
        let err = config.set("address", "somewhere").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot set address: address is a section, set one of its fields instead"
        );
        assert_eq!(config, joe());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("name=joe").unwrap(), ("name", "joe"));
        assert_eq!(parse_assignment("name=-").unwrap(), ("name", ""));
        assert_eq!(
            parse_assignment("name=").unwrap_err(),
            AccessError::BadAssignment
        );
        assert_eq!(
            parse_assignment("street=1 A=B St").unwrap(),
            ("street", "1 A=B St")
        );

        let err = parse_assignment("badformat").unwrap_err();
        assert_eq!(
            err.to_string(),
            "use '<key>=<value>' format (no spaces), use <key>='-' to set as empty"
        );
        assert_eq!(
            parse_assignment("=joe").unwrap_err(),
            AccessError::BadAssignment
        );
    }

    #[test]
    fn test_set_many_is_all_or_nothing() {
        let mut config = joe();
        let err = config
            .set_many(&["name=someNameOtherThanJoe", "nonExistantKey=someValue"])
            .unwrap_err();
        assert_eq!(err, AccessError::UnknownKey("nonExistantKey".to_string()));
        assert_eq!(config, joe());

        config
            .set_many(&["name=someNameOtherThanJoe", "zip=-"])
            .unwrap();
        assert_eq!(config.name, "someNameOtherThanJoe");
        assert_eq!(config.address.zipcode, "");
    }

    #[test]
    fn test_set_empty_value_needs_dash() {
        let mut config = joe();
        assert_eq!(
            config.set_many(&["name="]).unwrap_err(),
            AccessError::BadAssignment
        );
        assert_eq!(config.name, "joe");

        config.set_many(&["name=-"]).unwrap();
        assert_eq!(config.name, "");
    }

    #[test]
    fn test_set_many_requires_arguments() {
        let none: &[String] = &[];
        assert_eq!(
            joe().set_many(none).unwrap_err(),
            AccessError::NoVariable
        );
    }

    #[test]
    fn test_listing_is_ordered_and_redacted() {
        let mut config = joe();
        config.set("cvv", "123").unwrap();

        let listing = config.listing().to_string();
        assert_eq!(listing, LISTING);
        assert!(!listing.contains("cvv"));
        assert!(!listing.contains("123"));
    }

    #[test]
    fn test_listing_quotes_embedded_quotes() {
        let config = Config {
            name: "joe \"the pizza\" smith".to_string(),
            ..Config::default()
        };
        assert!(
            config
                .listing()
                .to_string()
                .starts_with("name: \"joe \\\"the pizza\\\" smith\"\n")
        );
    }
}
