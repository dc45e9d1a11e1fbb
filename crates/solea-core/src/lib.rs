//! Core state primitives for the Solea micro-framework.
//!
//! This crate provides the two state containers the rest of the framework
//! builds on:
//!
//! - [`Reactive`]: a keyed observable map that synchronously notifies a
//!   callback whenever a value actually changes. Components use it to drive
//!   re-rendering.
//! - [`Store`]: an owned key-value store with a live proxy handle for object
//!   entries. Constructed, used, and discarded by the caller; there is no
//!   process-global store.
//!
//! Both containers use [`serde_json::Value`] as their dynamically-typed value
//! model and are single-threaded (`Rc`-based), matching the cooperative
//! event-loop execution model of the framework.

pub mod reactive;
pub mod store;

pub use reactive::{Change, Reactive};
pub use store::{Store, StoreProxy};
