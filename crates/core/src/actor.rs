//! Actor identity used for audit attribution.

use serde::{Deserialize, Serialize};

/// Identity of whoever performed a stock-affecting mutation.
///
/// The transport layer supplies this when it knows the caller; mutations with
/// no known caller are attributed to [`Actor::system`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Fallback attribution when the caller boundary supplies no actor.
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

impl core::fmt::Display for Actor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Actor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
