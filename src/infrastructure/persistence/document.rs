//! Mapping table shared by the memory and file backends.
//!
//! The serialized shape is the on-disk format of the file backend:
//!
//! ```json
//! {
//!   "short_to_long": { "ab12": "http://example.com" },
//!   "user_to_shorts": { "1": ["ab12"] },
//!   "deleted": []
//! }
//! ```
//!
//! Lookup indexes for active long URLs and owners are not serialized; they are
//! rebuilt by [`MappingDocument::reindex`] after deserialization.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Mapping, NewMapping, StoredUrl, UserId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(default)]
    short_to_long: BTreeMap<String, String>,
    #[serde(default)]
    user_to_shorts: BTreeMap<UserId, Vec<String>>,
    #[serde(default)]
    deleted: BTreeSet<String>,

    #[serde(skip)]
    active_longs: HashMap<String, String>,
    #[serde(skip)]
    owners: HashMap<String, UserId>,
}

impl MappingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a serialized document. Empty input is an empty document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::new());
        }
        let mut document: Self = serde_json::from_str(raw)?;
        document.reindex();
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuilds the in-memory lookup indexes from the serialized fields.
    pub fn reindex(&mut self) {
        self.owners.clear();
        for (owner, shorts) in &self.user_to_shorts {
            for short in shorts {
                self.owners.insert(short.clone(), *owner);
            }
        }

        self.active_longs = self
            .short_to_long
            .iter()
            .filter(|(short, _)| !self.deleted.contains(*short))
            .map(|(short, long)| (long.clone(), short.clone()))
            .collect();
    }

    fn collides(&self, short: &str, long: &str) -> bool {
        self.short_to_long.contains_key(short) || self.active_longs.contains_key(long)
    }

    /// Inserts a mapping. Returns `false` and changes nothing on collision.
    pub fn insert(&mut self, short: &str, long: &str, owner: UserId) -> bool {
        if self.collides(short, long) {
            return false;
        }

        self.short_to_long.insert(short.to_string(), long.to_string());
        self.user_to_shorts
            .entry(owner)
            .or_default()
            .push(short.to_string());
        self.active_longs.insert(long.to_string(), short.to_string());
        self.owners.insert(short.to_string(), owner);
        true
    }

    /// Inserts every non-colliding item. Returns the number of skipped items.
    pub fn insert_batch(&mut self, items: &[NewMapping], owner: UserId) -> usize {
        items
            .iter()
            .filter(|item| !self.insert(&item.short, &item.long, owner))
            .count()
    }

    /// Full record for `short`. Hand-edited files may lack an owner entry;
    /// such records report owner `0`.
    pub fn record(&self, short: &str) -> Option<Mapping> {
        let long = self.short_to_long.get(short)?;

        let mut mapping = Mapping::new(
            short,
            long.as_str(),
            self.owners.get(short).copied().unwrap_or_default(),
        );
        mapping.deleted = self.deleted.contains(short);
        Some(mapping)
    }

    pub fn lookup(&self, short: &str) -> Option<StoredUrl> {
        self.record(short).map(|mapping| mapping.to_stored())
    }

    pub fn shorts_of(&self, owner: UserId) -> Vec<String> {
        self.user_to_shorts.get(&owner).cloned().unwrap_or_default()
    }

    /// Soft-deletes the active shorts owned by `owner`. Returns how many changed.
    pub fn mark_deleted(&mut self, owner: UserId, shorts: &[String]) -> usize {
        let mut changed = 0;

        for short in shorts {
            if self.owners.get(short) != Some(&owner) || self.deleted.contains(short) {
                continue;
            }
            let Some(long) = self.short_to_long.get(short) else {
                continue;
            };

            self.active_longs.remove(long);
            self.deleted.insert(short.clone());
            changed += 1;
        }

        changed
    }

    pub fn len(&self) -> usize {
        self.short_to_long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_to_long.is_empty()
    }
}
