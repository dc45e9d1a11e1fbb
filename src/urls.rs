//! Client-side routing
//!
//! Nested route declarations are flattened into an ordered matcher table
//! and dispatched against the host platform's navigational location, under
//! hash or history addressing. See [`solea_urls::Router`] for the front
//! door and [`solea_urls::MemoryPlatform`] for the in-process host used in
//! tests and non-browser embeddings.

// Re-export all solea-urls functionality
pub use solea_urls::*;
