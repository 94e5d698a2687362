//! Activity Stream document model
//!
//! Incoming documents are untyped JSON. This module decides whether a
//! document is an Activity Stream post and, if so, reads it into
//! [`ActivityPost`] with explicit handling of absent, null and mistyped
//! fields.

mod activity;
mod errors;
mod fields;
pub mod timestamp;

pub use activity::{is_activity_post, ActivityPost, Actor, PostObject, Provider, ACTIVITY_STREAM_TYPE, POST_VERB};
pub use errors::{DocumentError, DocumentResult};
pub use fields::{str_field_equals, Fields};
pub use timestamp::parse_posted_time;
