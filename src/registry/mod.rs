//! Reference data sources
//!
//! The WHO weight-for-height reference is loaded once into an immutable
//! [`ReferenceStore`] and shared by every classification call. Stores can be
//! memoized per source with [`ReferenceCache`].

pub mod cache;
pub mod reference;

pub use cache::ReferenceCache;
pub use reference::ReferenceStore;
