//! feedview - Activity Stream post view for document database indexing
//!
//! Maps each Activity Stream `post` document to one row keyed by
//! `[provider.id, postedTime]`. The host database owns storage, indexing and
//! queries; this crate only decides what a document contributes.
//!
//! ```ignore
//! use feedview::view;
//!
//! if let Some(row) = view::map(&doc)? {
//!     host.emit(row.key, row.value);
//! }
//! ```

pub mod cli;
pub mod document;
pub mod observability;
pub mod query_server;
pub mod view;
