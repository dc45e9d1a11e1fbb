//! Client-side routing for the Solea micro-framework.
//!
//! A nested route declaration ([`RouteNode`]) is flattened into an ordered
//! matcher table ([`RouteTable`]); the [`Dispatcher`] parses the current
//! navigational location under hash or history addressing and invokes the
//! first matching handler exactly once per distinct navigation; the
//! [`Router`] is the front door that wires everything to a [`Platform`]
//! (the navigational surface of the host) and performs programmatic
//! navigation.
//!
//! Dispatch never fails: unmatched routes fall back to the registered
//! catch-all handler, or degrade to a silent no-op when none exists.
//! Configuration problems (invalid or oversized patterns) surface as
//! [`RouteError`] at construction time instead.

pub mod dispatch;
pub mod error;
pub mod location;
pub mod pattern;
pub mod platform;
pub mod router;
pub mod routes;

pub use dispatch::Dispatcher;
pub use error::RouteError;
pub use location::{Location, Mode};
pub use pattern::PathPattern;
pub use platform::{MemoryPlatform, Platform};
pub use router::{Router, RouterOptions};
pub use routes::{Handler, RouteContext, RouteNode, RouteTable, Routes};
