//! Remote object identity.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stable remote object identifier.
///
/// Identities are assigned once by the owning session and must remain
/// stable for the lifetime of the server-side object. They address the
/// object in outbound operations and key inbound request parameters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ObjectId(String);

impl ObjectId {
    /// Creates a new object ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_new() {
        let id = ObjectId::new("w1");
        assert_eq!(id.as_str(), "w1");
    }

    #[test]
    fn object_id_from_str_and_string() {
        let a: ObjectId = "w2".into();
        let b: ObjectId = String::from("w2").into();
        assert_eq!(a, b);
    }

    #[test]
    fn object_id_into_string() {
        let id = ObjectId::new("w3");
        let raw: String = id.into();
        assert_eq!(raw, "w3");
    }

    #[test]
    fn object_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ObjectId::new("w1"));
        set.insert(ObjectId::new("w2"));
        set.insert(ObjectId::new("w1"));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ObjectId::new("w1")));
    }

    #[test]
    fn object_id_display() {
        assert_eq!(ObjectId::new("w42").to_string(), "w42");
    }
}
