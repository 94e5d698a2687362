//! Document-to-index mapper
//!
//! Turns Activity Stream post documents into rows keyed by
//! `[provider.id, postedTime]`, so a host index groups posts by provider and
//! orders them by time within each provider.
//!
//! # Invariants
//!
//! - Only `type == "Activity Stream"` and `verb == "post"` documents emit
//! - At most one row per document
//! - `author` falls back to `providerName`, `authorUrl` to `providerUrl`
//! - No state is kept between documents

mod entry;
mod errors;
mod function;
mod key;
mod mapper;
mod policy;

pub use entry::{Emission, PostEntry};
pub use errors::{ViewError, ViewErrorCode, ViewResult};
pub use function::ViewFunction;
pub use key::ViewKey;
pub use mapper::{map, RecentPostsView};
pub use policy::FallbackPolicy;
