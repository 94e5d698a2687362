//! Composite view key
//!
//! Rows group by provider and order by post time within a provider. Derived
//! ordering compares `provider_id` first; `None` sorts before any provider,
//! matching how `null` collates ahead of strings in view indexes.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::document::timestamp::render;

/// `[provider.id, postedTime]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewKey {
    pub provider_id: Option<String>,
    pub posted_at: DateTime<Utc>,
}

impl ViewKey {
    pub fn new(provider_id: Option<String>, posted_at: DateTime<Utc>) -> Self {
        Self {
            provider_id,
            posted_at,
        }
    }
}

impl Serialize for ViewKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.provider_id)?;
        tuple.serialize_element(&render(&self.posted_at))?;
        tuple.end()
    }
}
