//! Activity Stream post documents

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::DocumentResult;
use super::fields::{str_field_equals, Fields};
use super::timestamp::parse_posted_time;

/// Required value of the `type` field
pub const ACTIVITY_STREAM_TYPE: &str = "Activity Stream";

/// Required value of the `verb` field
pub const POST_VERB: &str = "post";

/// The posted item (`object`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostObject {
    /// Canonical link of the item
    pub id: Option<String>,
    /// Body or excerpt
    pub summary: Option<String>,
}

/// Originating platform (`provider`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Provider {
    /// Display name
    pub name: Option<String>,
    /// Canonical identifier or URL
    pub id: Option<String>,
}

/// Author of the post (`actor`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Actor {
    pub name: Option<String>,
    pub link: Option<String>,
}

/// A qualifying Activity Stream post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPost {
    pub posted_time: DateTime<Utc>,
    pub title: Option<String>,
    pub object: PostObject,
    pub provider: Provider,
    pub actor: Actor,
}

/// True when the document is `type: "Activity Stream"` and `verb: "post"`.
pub fn is_activity_post(doc: &Value) -> bool {
    str_field_equals(doc, "type", ACTIVITY_STREAM_TYPE) && str_field_equals(doc, "verb", POST_VERB)
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

impl ActivityPost {
    /// Read a post out of a raw document.
    ///
    /// Does not check qualification; callers filter with
    /// [`is_activity_post`] first. `object`, `provider` and `actor` must be
    /// objects and `postedTime` must parse. Other leaves may be absent.
    pub fn from_json(doc: &Value) -> DocumentResult<Self> {
        let root = Fields::root(doc)?;

        let posted_time = parse_posted_time(root.required_str("postedTime")?)?;
        let title = owned(root.optional_str("title")?);

        let object = root.object("object")?;
        let object = PostObject {
            id: owned(object.optional_str("id")?),
            summary: owned(object.optional_str("summary")?),
        };

        let provider = root.object("provider")?;
        let provider = Provider {
            name: owned(provider.optional_str("name")?),
            id: owned(provider.optional_str("id")?),
        };

        let actor = root.object("actor")?;
        let actor = Actor {
            name: owned(actor.optional_str("name")?),
            link: owned(actor.optional_str("link")?),
        };

        Ok(Self {
            posted_time,
            title,
            object,
            provider,
            actor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentError;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "Activity Stream",
            "verb": "post",
            "postedTime": "2021-01-01T00:00:00Z",
            "title": "T",
            "object": { "id": "L", "summary": "S" },
            "provider": { "name": "P", "id": "U" },
            "actor": { "name": "A" }
        })
    }

    #[test]
    fn test_qualification() {
        assert!(is_activity_post(&sample()));

        let mut doc = sample();
        doc["type"] = json!("Comment");
        assert!(!is_activity_post(&doc));

        let mut doc = sample();
        doc["verb"] = json!("share");
        assert!(!is_activity_post(&doc));

        assert!(!is_activity_post(&json!({})));
    }

    #[test]
    fn test_from_json() {
        let post = ActivityPost::from_json(&sample()).unwrap();
        assert_eq!(post.title.as_deref(), Some("T"));
        assert_eq!(post.object.id.as_deref(), Some("L"));
        assert_eq!(post.object.summary.as_deref(), Some("S"));
        assert_eq!(post.provider.name.as_deref(), Some("P"));
        assert_eq!(post.provider.id.as_deref(), Some("U"));
        assert_eq!(post.actor.name.as_deref(), Some("A"));
        assert_eq!(post.actor.link, None);
    }

    #[test]
    fn test_missing_containers() {
        for field in ["object", "provider", "actor"] {
            let mut doc = sample();
            doc.as_object_mut().unwrap().remove(field);
            assert_eq!(
                ActivityPost::from_json(&doc).unwrap_err(),
                DocumentError::MissingField(field.to_string())
            );
        }
    }

    #[test]
    fn test_missing_posted_time() {
        let mut doc = sample();
        doc.as_object_mut().unwrap().remove("postedTime");
        assert_eq!(
            ActivityPost::from_json(&doc).unwrap_err(),
            DocumentError::MissingField("postedTime".into())
        );
    }

    #[test]
    fn test_mistyped_leaf() {
        let mut doc = sample();
        doc["provider"]["id"] = json!(42);
        assert_eq!(
            ActivityPost::from_json(&doc).unwrap_err(),
            DocumentError::WrongType {
                path: "provider.id".into(),
                expected: "string"
            }
        );
    }
}
