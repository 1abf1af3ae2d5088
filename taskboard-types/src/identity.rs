use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the signed-in user, as used in record store filters.
///
/// Hosts hand out user ids wrapped in braces (`{8D5A...}`); those are
/// stripped and the remainder must be a GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn normalize(s: &str) -> String {
        s.trim().replace(['{', '}'], "")
    }
}

impl FromStr for UserId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = Self::normalize(s);
        Uuid::parse_str(&normalized)
            .map(Self)
            .with_context(|| format!("user id {s:?} is not a GUID"))
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Self::from_str(id.as_ref()).map_err(serde::de::Error::custom)
    }
}
