//! Strongly-typed ID wrappers for all entity types
//!
//! The backend identifies every resource by an integer primary key. Newtype
//! wrappers keep ids of different resources from being mixed up at compile
//! time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw integer id used in URLs
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "42" as well as the prefixed form ("env-42")
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(EnvelopeId, "env-");
define_id!(GoalId, "goal-");
define_id!(RecurringId, "rec-");
define_id!(UserId, "usr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(EnvelopeId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parse_with_prefix() {
        assert_eq!("env-7".parse::<EnvelopeId>().unwrap(), EnvelopeId::new(7));
        assert_eq!(" 7 ".parse::<EnvelopeId>().unwrap(), EnvelopeId::new(7));
        assert!("env-x".parse::<EnvelopeId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = GoalId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let back: GoalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
