//! Emitted row types

use chrono::{DateTime, Utc};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use super::key::ViewKey;
use crate::document::timestamp::js_date;

/// Value half of an emitted row.
///
/// Absent source fields are omitted from the JSON form rather than written
/// as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntry {
    #[serde(with = "js_date")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

/// One `(key, value)` pair handed back to the host.
///
/// Serializes as the two-element row `[key, value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub key: ViewKey,
    pub value: PostEntry,
}

impl Serialize for Emission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(2)?;
        row.serialize_element(&self.key)?;
        row.serialize_element(&self.value)?;
        row.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_entry_omits_absent_fields() {
        let entry = PostEntry {
            date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            title: None,
            link: Some("L".into()),
            body: None,
            provider_name: Some("P".into()),
            provider_url: Some("U".into()),
            author: Some("P".into()),
            author_url: Some("U".into()),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2021-01-01T00:00:00.000Z",
                "link": "L",
                "providerName": "P",
                "providerUrl": "U",
                "author": "P",
                "authorUrl": "U"
            })
        );

        let back: PostEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
