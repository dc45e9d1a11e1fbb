//! Route declarations: nested trees, flattening, and the compiled table.
//!
//! A route declaration is a tree: branches are named mappings of child
//! nodes, leaves are handlers. Flattening walks the tree depth-first in
//! declaration order and concatenates branch keys into full patterns, so
//!
//! ```text
//! { "/users": { "": list, "/:id": detail }, "*404": missing }
//! ```
//!
//! yields `/users`, `/users/:id`, and a status-404 fallback, in that order.
//!
//! Fallback entries - the catch-all `*` and status-coded `*<digits>` keys -
//! are registered separately and never participate in ordinary matching, so
//! a literal `404` path cannot collide with a `*404` fallback.

use crate::error::RouteError;
use crate::pattern::PathPattern;
use std::collections::HashMap;
use std::rc::Rc;

/// Status code reported when a fallback carries no parsable code.
const DEFAULT_FALLBACK_STATUS: u16 = 404;

/// The context a handler is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
	/// The matched pathname.
	pub pathname: String,
	/// The query portion of the location (`?...`), possibly empty.
	pub search: String,
	/// The fragment portion of the location (`#...`), possibly empty.
	pub hash: String,
	/// 200 for ordinary matches, the fallback's code otherwise.
	pub status: u16,
	/// Values captured from `:name` segments, empty for fallbacks.
	pub route_params: HashMap<String, String>,
}

/// A route handler. Return values are not consumed.
pub type Handler = Rc<dyn Fn(&RouteContext)>;

/// A node of the nested route declaration: either a handler leaf or a
/// branch of named children. Branch children keep declaration order.
pub enum RouteNode {
	/// Terminal node carrying the handler for the accumulated pattern.
	Leaf(Handler),
	/// Named children; the key is appended to the accumulated pattern.
	Branch(Vec<(String, RouteNode)>),
}

impl RouteNode {
	/// Creates a leaf from a handler closure.
	pub fn leaf<F>(handler: F) -> Self
	where
		F: Fn(&RouteContext) + 'static,
	{
		RouteNode::Leaf(Rc::new(handler))
	}

	/// Creates a branch from `(key, child)` pairs.
	pub fn branch<K, I>(children: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, RouteNode)>,
	{
		RouteNode::Branch(children.into_iter().map(|(k, n)| (k.into(), n)).collect())
	}
}

impl std::fmt::Debug for RouteNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RouteNode::Leaf(_) => f.write_str("Leaf"),
			RouteNode::Branch(children) => f
				.debug_map()
				.entries(children.iter().map(|(k, n)| (k, n)))
				.finish(),
		}
	}
}

/// Builder for a top-level route declaration.
///
/// ```
/// use solea_urls::Routes;
///
/// let routes = Routes::new()
///     .route("/", |_| {})
///     .nest("/users", Routes::new()
///         .route("", |_| {})
///         .route("/:id", |_| {}))
///     .route("*404", |_| {});
/// ```
#[derive(Default)]
pub struct Routes {
	children: Vec<(String, RouteNode)>,
}

impl Routes {
	/// Creates an empty declaration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a handler leaf under `key`.
	pub fn route<F>(mut self, key: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&RouteContext) + 'static,
	{
		self.children.push((key.into(), RouteNode::leaf(handler)));
		self
	}

	/// Nests a sub-declaration under `key`.
	pub fn nest(mut self, key: impl Into<String>, routes: Routes) -> Self {
		self.children.push((key.into(), routes.into_node()));
		self
	}

	/// Adds an arbitrary node under `key`.
	pub fn node(mut self, key: impl Into<String>, node: RouteNode) -> Self {
		self.children.push((key.into(), node));
		self
	}

	/// Converts the builder into a branch node.
	pub fn into_node(self) -> RouteNode {
		RouteNode::Branch(self.children)
	}
}

impl From<Routes> for RouteNode {
	fn from(routes: Routes) -> Self {
		routes.into_node()
	}
}

/// Flattens a declaration into `(pattern, handler)` pairs, depth-first in
/// declaration order, concatenating branch keys from the root down.
pub fn flatten(node: &RouteNode) -> Vec<(String, Handler)> {
	let mut flat = Vec::new();
	walk(node, "", &mut flat);
	flat
}

fn walk(node: &RouteNode, prefix: &str, flat: &mut Vec<(String, Handler)>) {
	match node {
		RouteNode::Leaf(handler) => flat.push((prefix.to_string(), Rc::clone(handler))),
		RouteNode::Branch(children) => {
			for (key, child) in children {
				let pattern = format!("{prefix}{key}");
				walk(child, &pattern, flat);
			}
		}
	}
}

/// One compiled ordinary route.
pub(crate) struct CompiledRoute {
	pub(crate) pattern: String,
	pub(crate) matcher: PathPattern,
	pub(crate) handler: Handler,
}

/// The registered fallback, if any.
pub(crate) struct Fallback {
	pub(crate) handler: Handler,
	pub(crate) status: u16,
}

/// An ordered matcher table compiled from a route declaration.
pub struct RouteTable {
	routes: Vec<CompiledRoute>,
	fallback: Option<Fallback>,
}

impl RouteTable {
	/// Compiles a declaration.
	///
	/// The first fallback entry encountered in flattening order wins; its
	/// digit suffix (if any) becomes the reported status, defaulting to 404.
	///
	/// # Errors
	///
	/// Returns [`RouteError`] if any ordinary pattern fails to compile.
	pub fn new(declaration: &RouteNode) -> Result<Self, RouteError> {
		let mut routes = Vec::new();
		let mut fallback: Option<Fallback> = None;

		for (pattern, handler) in flatten(declaration) {
			if is_fallback_pattern(&pattern) {
				if fallback.is_none() {
					let status = pattern[1..]
						.parse::<u16>()
						.unwrap_or(DEFAULT_FALLBACK_STATUS);
					tracing::debug!(pattern = %pattern, status, "registered fallback route");
					fallback = Some(Fallback { handler, status });
				}
				continue;
			}
			let matcher = PathPattern::new(&pattern)?;
			routes.push(CompiledRoute {
				pattern,
				matcher,
				handler,
			});
		}

		tracing::debug!(routes = routes.len(), has_fallback = fallback.is_some(), "route table compiled");
		Ok(Self { routes, fallback })
	}

	/// Number of ordinary (non-fallback) routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether the table has no ordinary routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Whether a fallback handler is registered.
	pub fn has_fallback(&self) -> bool {
		self.fallback.is_some()
	}

	/// Patterns of the ordinary routes, in table order.
	pub fn patterns(&self) -> impl Iterator<Item = &str> {
		self.routes.iter().map(|r| r.pattern.as_str())
	}

	pub(crate) fn routes(&self) -> &[CompiledRoute] {
		&self.routes
	}

	pub(crate) fn fallback(&self) -> Option<&Fallback> {
		self.fallback.as_ref()
	}
}

impl std::fmt::Debug for RouteTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteTable")
			.field("patterns", &self.routes.iter().map(|r| &r.pattern).collect::<Vec<_>>())
			.field("has_fallback", &self.fallback.is_some())
			.finish()
	}
}

/// Whether a flattened pattern registers a fallback: the literal `*`, or
/// `*` followed by digits only.
fn is_fallback_pattern(pattern: &str) -> bool {
	match pattern.strip_prefix('*') {
		Some("") => true,
		Some(rest) => rest.chars().all(|c| c.is_ascii_digit()),
		None => false,
	}
}
