//! Mapping entity representing a short → long URL association.

/// Pseudonymous caller identity carried in the user token.
pub type UserId = u32;

/// A stored short URL mapping.
///
/// `short` is never reassigned once stored, even after the mapping is
/// soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub short: String,
    pub long: String,
    pub owner: UserId,
    pub deleted: bool,
}

impl Mapping {
    /// Creates a new active mapping.
    pub fn new(short: impl Into<String>, long: impl Into<String>, owner: UserId) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
            owner,
            deleted: false,
        }
    }

    /// Returns the lookup view of this mapping.
    pub fn to_stored(&self) -> StoredUrl {
        StoredUrl {
            long_url: self.long.clone(),
            deleted: self.deleted,
        }
    }
}

/// Result of resolving a short code.
///
/// The deleted flag is kept so callers can tell "gone" from "never existed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUrl {
    pub long_url: String,
    pub deleted: bool,
}

impl StoredUrl {
    /// Returns true if the mapping has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// One item of a batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short: String,
    pub long: String,
}

impl NewMapping {
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
        }
    }
}
