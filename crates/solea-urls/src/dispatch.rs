//! Route dispatch: location parsing, first-match scan, deduplication.
//!
//! One dispatch is a complete cycle: parse the current location, match it
//! against the table in declaration order, invoke the first matching
//! handler (or the fallback). A non-forced dispatch for a pathname equal to
//! the last dispatched one is a no-op - that is what keeps a navigation
//! event and a programmatic trigger for the same address from invoking a
//! handler twice.
//!
//! Dispatch never raises. Unmatched routes without a fallback complete with
//! no visible effect.

use crate::location::{Mode, parse_location};
use crate::platform::Platform;
use crate::routes::{RouteContext, RouteTable};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Matches parsed locations against a [`RouteTable`] and invokes handlers.
pub struct Dispatcher {
	table: RouteTable,
	mode: Mode,
	root: String,
	platform: Rc<dyn Platform>,
	last_dispatched: RefCell<Option<String>>,
}

impl Dispatcher {
	/// Creates a dispatcher over a compiled table.
	pub fn new(table: RouteTable, mode: Mode, root: String, platform: Rc<dyn Platform>) -> Self {
		Self {
			table,
			mode,
			root,
			platform,
			last_dispatched: RefCell::new(None),
		}
	}

	/// Performs one dispatch cycle.
	///
	/// `forced` bypasses the unchanged-pathname check; it is used by the
	/// initial dispatch and by programmatic fallback triggers. Navigation
	/// change notifications dispatch non-forced.
	pub fn handle_route(&self, forced: bool) {
		let location = parse_location(self.platform.as_ref(), self.mode, &self.root);

		{
			let mut last = self.last_dispatched.borrow_mut();
			if !forced && last.as_deref() == Some(location.pathname.as_str()) {
				tracing::trace!(pathname = %location.pathname, "pathname unchanged, dispatch skipped");
				return;
			}
			*last = Some(location.pathname.clone());
		}

		for route in self.table.routes() {
			if let Some(route_params) = route.matcher.matches(&location.pathname) {
				tracing::debug!(pattern = %route.pattern, pathname = %location.pathname, "route matched");
				let ctx = RouteContext {
					pathname: location.pathname,
					search: location.search,
					hash: location.hash,
					status: 200,
					route_params,
				};
				(route.handler)(&ctx);
				return;
			}
		}

		match self.table.fallback() {
			Some(fallback) => {
				tracing::debug!(pathname = %location.pathname, status = fallback.status, "dispatching fallback");
				let ctx = RouteContext {
					pathname: location.pathname,
					search: location.search,
					hash: location.hash,
					status: fallback.status,
					route_params: HashMap::new(),
				};
				(fallback.handler)(&ctx);
			}
			None => {
				// Soft miss: no fallback registered, dispatch completes
				// with no visible effect.
				tracing::debug!(pathname = %location.pathname, "no route matched, no fallback registered");
			}
		}
	}

	/// The pathname of the last dispatch, if any.
	pub fn last_dispatched_pathname(&self) -> Option<String> {
		self.last_dispatched.borrow().clone()
	}
}

impl std::fmt::Debug for Dispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Dispatcher")
			.field("mode", &self.mode)
			.field("root", &self.root)
			.field("table", &self.table)
			.field("last_dispatched", &*self.last_dispatched.borrow())
			.finish()
	}
}
