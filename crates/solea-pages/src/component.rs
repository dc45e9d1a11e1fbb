//! Components: reactive state wired to a render surface.
//!
//! A [`Component`] owns a deep [`Reactive`] state map and a template
//! function. Every state change re-renders: the cached template string is
//! interpolated against the current state, and if the result differs from
//! the surface's live content, the difference is applied as an edit script
//! ([`compute_edits`]/[`apply_edits`]) instead of wholesale replacement.
//!
//! The template function runs once at mount and again on an explicit
//! [`Component::rerender`]; plain state changes reuse the cached template
//! string and only re-interpolate it.

use crate::diff::{apply_edits, compute_edits};
use crate::template::render_template;
use solea_core::Reactive;
use std::cell::RefCell;
use std::rc::Rc;

/// Live markup content a component renders into.
///
/// The in-browser implementation would be an element's inner markup; tests
/// and non-browser hosts use [`BufferSurface`].
pub trait Surface {
	/// Current content of the surface.
	fn html(&self) -> String;
	/// Replaces the content of the surface.
	fn set_html(&self, html: &str);
}

/// An in-memory [`Surface`]. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct BufferSurface {
	content: Rc<RefCell<String>>,
}

impl BufferSurface {
	/// Creates an empty surface.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a surface with existing content.
	pub fn with_content(content: &str) -> Self {
		Self {
			content: Rc::new(RefCell::new(content.to_string())),
		}
	}
}

impl Surface for BufferSurface {
	fn html(&self) -> String {
		self.content.borrow().clone()
	}

	fn set_html(&self, html: &str) {
		*self.content.borrow_mut() = html.to_string();
	}
}

struct ComponentInner {
	surface: Rc<dyn Surface>,
	template: RefCell<String>,
	template_fn: Box<dyn Fn(&Reactive) -> String>,
	state: Reactive,
}

impl ComponentInner {
	fn render(&self) {
		let markup = render_template(&self.template.borrow(), &self.state.snapshot());
		let current = self.surface.html();
		if current == markup {
			return;
		}
		let ops = compute_edits(&current, &markup);
		tracing::trace!(ops = ops.len(), "patching render surface");
		self.surface.set_html(&apply_edits(&current, &ops));
	}
}

/// A mounted component.
pub struct Component {
	inner: Rc<ComponentInner>,
}

impl Component {
	/// Mounts a component onto `surface`.
	///
	/// `template_fn` receives the component's state and returns the template
	/// string. It is invoked immediately (and the first render happens before
	/// `mount` returns), then again only on [`Component::rerender`].
	pub fn mount<F>(surface: Rc<dyn Surface>, template_fn: F) -> Self
	where
		F: Fn(&Reactive) -> String + 'static,
	{
		let state = Reactive::new(true);
		let inner = Rc::new(ComponentInner {
			surface,
			template: RefCell::new(String::new()),
			template_fn: Box::new(template_fn),
			state: state.clone(),
		});
		// The state callback holds a weak handle so component teardown is
		// just dropping the Component.
		let weak = Rc::downgrade(&inner);
		state.on_change(move |_| {
			if let Some(inner) = weak.upgrade() {
				inner.render();
			}
		});
		*inner.template.borrow_mut() = (inner.template_fn)(&inner.state);
		inner.render();
		Self { inner }
	}

	/// The component's reactive state.
	pub fn state(&self) -> &Reactive {
		&self.inner.state
	}

	/// Re-invokes the template function and renders the result.
	pub fn rerender(&self) {
		let template = (self.inner.template_fn)(&self.inner.state);
		*self.inner.template.borrow_mut() = template;
		self.inner.render();
	}
}

impl std::fmt::Debug for Component {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Component")
			.field("state", &self.inner.state)
			.finish()
	}
}
