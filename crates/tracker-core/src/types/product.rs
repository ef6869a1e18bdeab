//! Product reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The URL of the tracked product page.
///
/// Used both as the fetch target and as the link in alert messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(String);

impl ProductRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
