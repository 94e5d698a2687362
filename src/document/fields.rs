//! Typed field access over loosely-shaped JSON documents
//!
//! Absent and `null` are treated alike. A present value of the wrong JSON
//! type is an error rather than a silent default.

use serde_json::{Map, Value};

use super::errors::{DocumentError, DocumentResult};

/// Path label used when the document itself is not an object
const ROOT: &str = "<document>";

/// A JSON object plus the dotted path that led to it
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> Fields<'a> {
    /// Wrap a top-level document
    pub fn root(value: &'a Value) -> DocumentResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                prefix: String::new(),
            }),
            _ => Err(DocumentError::NotAnObject(ROOT.to_string())),
        }
    }

    /// Dotted path for a child of this object
    pub fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        match self.map.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Descend into a required nested object
    pub fn object(&self, name: &str) -> DocumentResult<Fields<'a>> {
        match self.get(name) {
            None => Err(DocumentError::MissingField(self.path(name))),
            Some(Value::Object(map)) => Ok(Fields {
                map,
                prefix: self.path(name),
            }),
            Some(_) => Err(DocumentError::NotAnObject(self.path(name))),
        }
    }

    /// Read a string that may be absent
    pub fn optional_str(&self, name: &str) -> DocumentResult<Option<&'a str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(DocumentError::WrongType {
                path: self.path(name),
                expected: "string",
            }),
        }
    }

    /// Read a string that must be present
    pub fn required_str(&self, name: &str) -> DocumentResult<&'a str> {
        self.optional_str(name)?
            .ok_or_else(|| DocumentError::MissingField(self.path(name)))
    }
}

/// True when `value[name]` is exactly the given string.
///
/// Never fails: anything other than a matching string is simply `false`.
pub fn str_field_equals(value: &Value, name: &str, expected: &str) -> bool {
    value.get(name).and_then(Value::as_str) == Some(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_requires_object() {
        assert!(Fields::root(&json!({})).is_ok());
        assert_eq!(
            Fields::root(&json!([1, 2])).unwrap_err(),
            DocumentError::NotAnObject("<document>".into())
        );
    }

    #[test]
    fn test_nested_paths() {
        let doc = json!({ "provider": { "name": "P" } });
        let root = Fields::root(&doc).unwrap();
        let provider = root.object("provider").unwrap();
        assert_eq!(provider.path("id"), "provider.id");
        assert_eq!(provider.optional_str("name").unwrap(), Some("P"));
        assert_eq!(provider.optional_str("id").unwrap(), None);
    }

    #[test]
    fn test_null_is_absent() {
        let doc = json!({ "actor": null, "title": null });
        let root = Fields::root(&doc).unwrap();
        assert_eq!(
            root.object("actor").unwrap_err(),
            DocumentError::MissingField("actor".into())
        );
        assert_eq!(root.optional_str("title").unwrap(), None);
    }

    #[test]
    fn test_wrong_types() {
        let doc = json!({ "object": "not-an-object", "title": 7 });
        let root = Fields::root(&doc).unwrap();
        assert_eq!(
            root.object("object").unwrap_err(),
            DocumentError::NotAnObject("object".into())
        );
        assert_eq!(
            root.optional_str("title").unwrap_err(),
            DocumentError::WrongType {
                path: "title".into(),
                expected: "string"
            }
        );
    }

    #[test]
    fn test_required_str() {
        let doc = json!({ "postedTime": "2021-01-01" });
        let root = Fields::root(&doc).unwrap();
        assert_eq!(root.required_str("postedTime").unwrap(), "2021-01-01");
        assert_eq!(
            root.required_str("missing").unwrap_err(),
            DocumentError::MissingField("missing".into())
        );
    }

    #[test]
    fn test_str_field_equals() {
        let doc = json!({ "verb": "post", "type": 3 });
        assert!(str_field_equals(&doc, "verb", "post"));
        assert!(!str_field_equals(&doc, "verb", "share"));
        assert!(!str_field_equals(&doc, "type", "3"));
        assert!(!str_field_equals(&doc, "absent", "post"));
        assert!(!str_field_equals(&json!("scalar"), "verb", "post"));
    }
}
