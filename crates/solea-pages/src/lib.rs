//! Reactive rendering pipeline for the Solea micro-framework.
//!
//! The pipeline is textual end to end: a component's template function
//! produces a markup string, [`template::render_template`] interpolates
//! `{{name}}` placeholders from reactive state, and [`diff`] reconciles the
//! render surface by applying a minimal-ish edit script instead of replacing
//! the whole content. This is deliberately not a virtual-DOM reconciler: it
//! never builds element trees, only compares strings.

pub mod component;
pub mod diff;
pub mod template;

pub use component::{BufferSurface, Component, Surface};
pub use diff::{EditOp, apply_edits, compute_edits};
pub use template::render_template;
