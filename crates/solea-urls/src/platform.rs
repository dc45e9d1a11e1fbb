//! The navigational surface of the host platform.
//!
//! [`Platform`] abstracts everything the router needs from its host: the
//! current path/search/hash, the address fragment, history pushes, change
//! notifications, and a way to defer a task to the end of the current
//! synchronous turn (the zero-delay-timer analogue).
//!
//! [`MemoryPlatform`] is the in-process implementation: a single-threaded
//! event-loop model with an explicit pending-task queue. Tests (and any
//! non-browser host) drive it by calling [`MemoryPlatform::run_pending`]
//! wherever a real event loop would drain its queue. A browser host would
//! implement the same trait over its location/history bindings.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Host navigational surface consumed by the router.
pub trait Platform {
	/// Current path (history addressing), e.g. `/app/users/42`.
	fn path(&self) -> String;
	/// Current query string including its `?`, or empty.
	fn search(&self) -> String;
	/// Current fragment including its `#`, or empty.
	fn hash(&self) -> String;
	/// The fragment text after the `#` marker (hash addressing), or empty.
	fn fragment(&self) -> String;
	/// Pushes a new path onto the history stack. Does not notify listeners.
	fn push_path(&self, path: &str);
	/// Assigns the address fragment. If the fragment actually changes,
	/// listeners are notified asynchronously (on the task queue).
	fn set_fragment(&self, fragment: &str);
	/// Registers a location-change listener (fragment changes and history
	/// pops).
	fn on_location_change(&self, listener: Rc<dyn Fn()>);
	/// Schedules `task` to run after the current synchronous turn.
	fn defer(&self, task: Task);
}

struct MemoryPlatformInner {
	path: RefCell<String>,
	search: RefCell<String>,
	hash: RefCell<String>,
	fragment: RefCell<String>,
	listeners: RefCell<Vec<Rc<dyn Fn()>>>,
	tasks: RefCell<VecDeque<Task>>,
}

/// An in-memory, single-threaded [`Platform`]. Clones share state.
#[derive(Clone)]
pub struct MemoryPlatform {
	inner: Rc<MemoryPlatformInner>,
}

impl Default for MemoryPlatform {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryPlatform {
	/// Creates a platform at path `/` with an empty fragment.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(MemoryPlatformInner {
				path: RefCell::new("/".to_string()),
				search: RefCell::new(String::new()),
				hash: RefCell::new(String::new()),
				fragment: RefCell::new(String::new()),
				listeners: RefCell::new(Vec::new()),
				tasks: RefCell::new(VecDeque::new()),
			}),
		}
	}

	/// Sets the current path/search/hash without notifying anyone, as if
	/// the page had been loaded at this address.
	pub fn load(&self, path: &str, search: &str, hash: &str) {
		*self.inner.path.borrow_mut() = path.to_string();
		*self.inner.search.borrow_mut() = search.to_string();
		*self.inner.hash.borrow_mut() = hash.to_string();
	}

	/// Sets the fragment without notifying anyone (initial page state).
	pub fn load_fragment(&self, fragment: &str) {
		*self.inner.fragment.borrow_mut() = fragment.to_string();
	}

	/// Simulates a history pop (back/forward): sets the path and queues a
	/// listener notification.
	pub fn pop_to(&self, path: &str) {
		*self.inner.path.borrow_mut() = path.to_string();
		self.queue_notification();
	}

	/// Runs queued tasks until the queue is empty, returning how many ran.
	/// Tasks may queue further tasks; those run too.
	pub fn run_pending(&self) -> usize {
		let mut count = 0;
		loop {
			let task = self.inner.tasks.borrow_mut().pop_front();
			match task {
				Some(task) => {
					task();
					count += 1;
				}
				None => break,
			}
		}
		count
	}

	/// Number of tasks currently queued.
	pub fn pending(&self) -> usize {
		self.inner.tasks.borrow().len()
	}

	fn queue_notification(&self) {
		let inner = Rc::clone(&self.inner);
		self.inner.tasks.borrow_mut().push_back(Box::new(move || {
			let listeners: Vec<Rc<dyn Fn()>> = inner.listeners.borrow().clone();
			for listener in listeners {
				listener();
			}
		}));
	}
}

impl Platform for MemoryPlatform {
	fn path(&self) -> String {
		self.inner.path.borrow().clone()
	}

	fn search(&self) -> String {
		self.inner.search.borrow().clone()
	}

	fn hash(&self) -> String {
		self.inner.hash.borrow().clone()
	}

	fn fragment(&self) -> String {
		self.inner.fragment.borrow().clone()
	}

	fn push_path(&self, path: &str) {
		*self.inner.path.borrow_mut() = path.to_string();
		// A push replaces the whole address; query and fragment reset.
		self.inner.search.borrow_mut().clear();
		self.inner.hash.borrow_mut().clear();
	}

	fn set_fragment(&self, fragment: &str) {
		let changed = {
			let mut current = self.inner.fragment.borrow_mut();
			if *current == fragment {
				false
			} else {
				*current = fragment.to_string();
				true
			}
		};
		// Change notifications are asynchronous, like `hashchange`.
		if changed {
			self.queue_notification();
		}
	}

	fn on_location_change(&self, listener: Rc<dyn Fn()>) {
		self.inner.listeners.borrow_mut().push(listener);
	}

	fn defer(&self, task: Task) {
		self.inner.tasks.borrow_mut().push_back(task);
	}
}

impl std::fmt::Debug for MemoryPlatform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryPlatform")
			.field("path", &*self.inner.path.borrow())
			.field("fragment", &*self.inner.fragment.borrow())
			.field("pending_tasks", &self.inner.tasks.borrow().len())
			.finish()
	}
}
