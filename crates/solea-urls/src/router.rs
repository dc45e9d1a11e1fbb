//! The router front end: construction options and programmatic navigation.
//!
//! A router compiles its route declaration once, then either *listens* -
//! subscribing to location changes and deferring its initial dispatch to
//! the end of the current turn, so handlers registered in the same turn
//! are in place - or runs *scoped*: one forced dispatch at construction
//! and no listener, leaving re-render timing to whoever constructed it.

use crate::dispatch::Dispatcher;
use crate::error::RouteError;
use crate::location::Mode;
use crate::platform::Platform;
use crate::routes::{RouteNode, RouteTable};
use std::rc::Rc;

/// Construction options for a [`Router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
	/// Addressing strategy. Defaults to [`Mode::Hash`].
	pub mode: Mode,
	/// Mount prefix, stripped from platform paths in history addressing.
	pub root: String,
	/// Whether the router subscribes to location changes. A non-listening
	/// router dispatches once at construction and then only on [`Router::go`].
	pub listen: bool,
}

impl Default for RouterOptions {
	fn default() -> Self {
		Self {
			mode: Mode::Hash,
			root: "/".to_string(),
			listen: true,
		}
	}
}

/// A compiled, mounted router.
pub struct Router {
	dispatcher: Rc<Dispatcher>,
	platform: Rc<dyn Platform>,
	mode: Mode,
	root: String,
	listen: bool,
}

impl Router {
	/// Compiles `routes` and mounts the router on `platform`.
	///
	/// A listening router registers its change listener and defers the
	/// initial dispatch; a scoped router dispatches immediately, once.
	///
	/// # Errors
	///
	/// Returns [`RouteError`] if any route pattern fails to compile.
	pub fn new(
		routes: impl Into<RouteNode>,
		options: RouterOptions,
		platform: Rc<dyn Platform>,
	) -> Result<Self, RouteError> {
		let table = RouteTable::new(&routes.into())?;
		let dispatcher = Rc::new(Dispatcher::new(
			table,
			options.mode,
			options.root.clone(),
			Rc::clone(&platform),
		));

		if options.listen {
			let for_listener = Rc::clone(&dispatcher);
			platform.on_location_change(Rc::new(move || for_listener.handle_route(false)));
			let for_initial = Rc::clone(&dispatcher);
			platform.defer(Box::new(move || for_initial.handle_route(true)));
			tracing::debug!(mode = ?options.mode, root = %options.root, "router listening");
		} else {
			dispatcher.handle_route(true);
			tracing::debug!(mode = ?options.mode, root = %options.root, "router dispatched scoped");
		}

		Ok(Self {
			dispatcher,
			platform,
			mode: options.mode,
			root: options.root,
			listen: options.listen,
		})
	}

	/// Navigates to `target`.
	///
	/// A target starting with `*` forces a re-dispatch of the current
	/// location (the way to programmatically reach the fallback handler).
	/// Otherwise the platform address is updated: in history addressing the
	/// root-prefixed path is pushed and dispatch runs immediately; in hash
	/// addressing only the fragment is assigned, and dispatch arrives
	/// through the platform's change notification (so a scoped router moves
	/// the fragment without dispatching).
	pub fn go(&self, target: &str) {
		if target.starts_with('*') {
			self.dispatcher.handle_route(true);
			return;
		}
		match self.mode {
			Mode::History => {
				let path = format!("{}{}", self.root.trim_end_matches('/'), lead_slash(target));
				self.platform.push_path(&path);
				self.dispatcher.handle_route(true);
			}
			Mode::Hash => {
				// Dispatch rides on the platform's change notification; a
				// scoped router has no subscription and stays quiet.
				self.platform.set_fragment(&lead_slash(target));
			}
		}
	}

	/// The addressing mode this router was mounted with.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// The mount prefix this router was mounted with.
	pub fn root(&self) -> &str {
		&self.root
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("mode", &self.mode)
			.field("root", &self.root)
			.field("listen", &self.listen)
			.field("dispatcher", &self.dispatcher)
			.finish()
	}
}

/// Ensures a navigation target carries a leading slash.
fn lead_slash(target: &str) -> String {
	if target.starts_with('/') {
		target.to_string()
	} else {
		format!("/{target}")
	}
}
