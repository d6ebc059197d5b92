//! Local key-value storage
//!
//! This module provides a small persistent store that keeps one JSON document per
//! key in the user's config directory. Preferences, recent searches and the
//! local user list all live here.

mod store;

pub use store::{KeyValueStore, StorageError, StoredValue};
