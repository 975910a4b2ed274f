// ── Entity identity ──
//
// Every seeded record carries a short string key ("1", "main", ...).
// The key has no structure beyond uniqueness within its list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for any dashboard entity, unique within its own list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_the_raw_key() {
        let id = EntityId::from("branch-a");
        assert_eq!(id.to_string(), "branch-a");
        assert_eq!(id.as_str(), "branch-a");
    }

    #[test]
    fn equal_keys_compare_equal() {
        assert_eq!(EntityId::from("1"), EntityId::new(String::from("1")));
        assert_ne!(EntityId::from("1"), EntityId::from("2"));
    }
}
