//! # Solea
//!
//! A browser-resident micro-framework: client-side routing over nested route
//! declarations, reactive state with change notification, diff-patched
//! text rendering, and a small typed key-value store.
//!
//! Solea is organized as a facade over three member crates:
//!
//! - [`state`] - reactive objects ([`state::Reactive`]) and the key-value
//!   store ([`state::Store`])
//! - [`urls`] - route declaration, flattening, pattern matching, and
//!   dispatch ([`urls::Router`])
//! - [`pages`] - templates, minimal text diffing, and the reactive
//!   component pipeline ([`pages::Component`])
//!
//! ## Feature Flags
//!
//! - `urls` - client-side routing
//! - `pages` - templates, diffing, components
//! - `full` (default) - everything
//!
//! Reactive state and the store are always included.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use solea::prelude::*;
//! use std::rc::Rc;
//!
//! let platform = Rc::new(MemoryPlatform::new());
//! let routes = Routes::new()
//!     .route("/", |_| { /* render home */ })
//!     .nest("/users", Routes::new()
//!         .route("", |_| { /* render list */ })
//!         .route("/:id", |ctx| {
//!             let id = &ctx.route_params["id"];
//!             // render detail
//!         }))
//!     .route("*404", |ctx| { /* render missing, ctx.status == 404 */ });
//!
//! let router = Router::new(routes, RouterOptions::default(), platform.clone())?;
//! router.go("/users/42");
//! platform.run_pending();
//! # Ok::<(), solea::urls::RouteError>(())
//! ```

// Module re-exports, one per member crate
pub mod state;
#[cfg(feature = "urls")]
pub mod urls;
#[cfg(feature = "pages")]
pub mod pages;

// Re-export state types
pub use solea_core::{Change, Reactive, Store, StoreProxy};

// Re-export routing
#[cfg(feature = "urls")]
pub use solea_urls::{
	Dispatcher, Location, MemoryPlatform, Mode, PathPattern, Platform, RouteContext, RouteError,
	RouteNode, RouteTable, Router, RouterOptions, Routes,
};

// Re-export rendering
#[cfg(feature = "pages")]
pub use solea_pages::{
	BufferSurface, Component, EditOp, Surface, apply_edits, compute_edits, render_template,
};

/// Commonly used imports, glob-importable.
pub mod prelude {
	pub use crate::{Change, Reactive, Store, StoreProxy};

	#[cfg(feature = "urls")]
	pub use crate::{
		MemoryPlatform, Mode, Platform, RouteContext, RouteError, Router, RouterOptions, Routes,
	};

	#[cfg(feature = "pages")]
	pub use crate::{Component, Surface, render_template};
}
