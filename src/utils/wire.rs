//! Conversion of enum values to and from the strings Twinfield uses on the wire.
//!
//! Enums carry their wire names through `#[serde(rename_all = "...")]`; [`wire_format!`] derives
//! `Display` and `FromStr` from those names.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned, de::IntoDeserializer};

use crate::error::{Error, Result};

pub(crate) fn fmt_wire<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_value(value).map_err(|_| fmt::Error)? {
        serde_json::Value::String(name) => f.write_str(&name),
        _ => Err(fmt::Error),
    }
}

pub(crate) fn parse_wire<T: DeserializeOwned>(field: &'static str, value: &str) -> Result<T> {
    let deserializer: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
        value.into_deserializer();
    T::deserialize(deserializer).map_err(|_| Error::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Implements `Display` and `FromStr` through the serde wire names of an enum.
macro_rules! wire_format {
    ($ty:ty, $field:literal) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::utils::wire::fmt_wire(self, f)
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                $crate::utils::wire::parse_wire($field, s)
            }
        }
    };
}

pub(crate) use wire_format;

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Side {
        Debit,
        NotMatchable,
    }

    wire_format!(Side, "side");

    #[test]
    fn uses_serde_names() {
        assert_eq!(Side::Debit.to_string(), "debit");
        assert_eq!(Side::NotMatchable.to_string(), "notmatchable");
        assert_eq!("notmatchable".parse::<Side>().unwrap(), Side::NotMatchable);
    }

    #[test]
    fn unknown_names_are_invalid_values() {
        match "Debit".parse::<Side>().unwrap_err() {
            Error::InvalidValue { field, value } => {
                assert_eq!(field, "side");
                assert_eq!(value, "Debit");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }
}
