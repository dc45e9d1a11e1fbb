//! Reactive state and the key-value store
//!
//! Reactive objects carry JSON-shaped values and notify a registered
//! callback with a [`solea_core::Change`] record whenever a stored value
//! actually changes. The store is a flat namespace of serialized values
//! with live proxies.

// Re-export all solea-core functionality
pub use solea_core::*;
