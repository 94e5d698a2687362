//! The recent-posts-by-topic view
//!
//! One document in, zero or one row out. Documents that are not Activity
//! Stream posts produce nothing; qualifying documents that cannot be read
//! produce a [`ViewError`].

use serde_json::Value;

use super::entry::{Emission, PostEntry};
use super::errors::{ViewError, ViewResult};
use super::key::ViewKey;
use super::policy::FallbackPolicy;
use crate::document::{is_activity_post, ActivityPost};

/// Map one document with the default fallback policy.
pub fn map(doc: &Value) -> ViewResult<Option<Emission>> {
    RecentPostsView::default().map_document(doc)
}

/// Posts keyed by `[provider.id, postedTime]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecentPostsView {
    policy: FallbackPolicy,
}

impl RecentPostsView {
    /// Name under which the view is registered
    pub const NAME: &'static str = "recent-posts-by-topic";

    pub fn new(policy: FallbackPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Map a raw document.
    pub fn map_document(&self, doc: &Value) -> ViewResult<Option<Emission>> {
        if !is_activity_post(doc) {
            return Ok(None);
        }

        let post = ActivityPost::from_json(doc).map_err(|e| ViewError::for_document(e, doc))?;
        Ok(Some(self.project(post)))
    }

    /// Build the row for an already-read post.
    pub fn project(&self, post: ActivityPost) -> Emission {
        let ActivityPost {
            posted_time,
            title,
            object,
            provider,
            actor,
        } = post;

        let author = self
            .policy
            .resolve(actor.name.as_deref(), provider.name.as_deref());
        let author_url = self
            .policy
            .resolve(actor.link.as_deref(), provider.id.as_deref());

        let key = ViewKey::new(provider.id.clone(), posted_time);
        let value = PostEntry {
            date: posted_time,
            title,
            link: object.id,
            body: object.summary,
            provider_name: provider.name,
            provider_url: provider.id,
            author,
            author_url,
        };

        Emission { key, value }
    }
}
