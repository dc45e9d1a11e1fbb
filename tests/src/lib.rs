//! Cross-crate integration tests for Solea.
//!
//! The test binaries under `tests/` exercise the full pipeline: route
//! declaration through dispatch, handler-mounted components, and reactive
//! state driving surface patches.
