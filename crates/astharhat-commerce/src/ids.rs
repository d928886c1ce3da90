//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a CategoryId where a ProductId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exclusive upper bound of the numeric part of a tracking number.
pub const TRACKING_NUMBER_RANGE: u32 = 10_000_000;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(TrackingNumber);

impl TrackingNumber {
    /// Generate a tracking number of the form `TRK-<n>`, `n` uniform in `[0, 10_000_000)`.
    pub fn generate() -> Self {
        use rand::Rng;

        let n: u32 = rand::thread_rng().gen_range(0..TRACKING_NUMBER_RANGE);
        Self(format!("TRK-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("p1");
        assert_eq!(id.as_str(), "p1");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "p4".into();
        assert_eq!(id.as_str(), "p4");
        assert_eq!(format!("{}", id), "p4");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("p2")).unwrap();
        assert_eq!(json, "\"p2\"");
    }

    #[test]
    fn test_tracking_number_format() {
        for _ in 0..50 {
            let tracking = TrackingNumber::generate();
            let digits = tracking.as_str().strip_prefix("TRK-").unwrap();
            let n: u32 = digits.parse().unwrap();
            assert!(n < TRACKING_NUMBER_RANGE);
        }
    }
}
