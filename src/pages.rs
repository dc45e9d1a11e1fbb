//! Templates, text diffing, and reactive components
//!
//! The rendering pipeline is textual: template functions produce markup
//! strings, `{{name}}` placeholders interpolate reactive state, and the
//! render surface is reconciled with a character-level edit script rather
//! than replaced wholesale.

// Re-export all solea-pages functionality
pub use solea_pages::*;
