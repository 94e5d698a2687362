//! View function seam
//!
//! Adapters that run views on behalf of a host hold them as
//! `Box<dyn ViewFunction>` and collect every row a document produces.

use serde_json::Value;

use super::entry::Emission;
use super::errors::ViewResult;
use super::mapper::RecentPostsView;

/// A map function over raw documents
pub trait ViewFunction: Send + Sync {
    /// Registered name
    fn name(&self) -> &str;

    /// All rows for one document, in emission order
    fn map(&self, doc: &Value) -> ViewResult<Vec<Emission>>;
}

impl ViewFunction for RecentPostsView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map(&self, doc: &Value) -> ViewResult<Vec<Emission>> {
        Ok(self.map_document(doc)?.into_iter().collect())
    }
}
