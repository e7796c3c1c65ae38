//! Database repositories for the data access layer
//!
//! [`collection`] is the generic document collection; [`video`] and [`playlist`] are the
//! typed repositories built on it. [`filter`] turns list queries into predicates and
//! [`document`] normalizes stored rows into API records.

pub mod collection;
pub mod document;
pub mod filter;
pub mod info;
pub mod playlist;
pub mod video;

pub use collection::{Collection, DocumentFilter, MatchAll};
pub use document::{normalize, StoredDocument};
pub use filter::{contains_pattern, VideoFilter, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use info::DatabaseInfoRepository;
pub use playlist::PlaylistRepository;
pub use video::VideoRepository;
