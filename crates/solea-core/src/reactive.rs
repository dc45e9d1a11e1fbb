//! Reactive - Observable Keyed State
//!
//! [`Reactive`] wraps a keyed map of [`serde_json::Value`] so that writes and
//! deletions which actually change a value synchronously invoke a registered
//! callback. It is the change-detection half of the component render pipeline.
//!
//! ## Key Features
//!
//! - **Change Detection**: writing a value equal to the current one never
//!   fires the callback; deleting an absent key never fires the callback.
//! - **Deep Wrapping**: in deep mode, object values are recursively wrapped
//!   into nested `Reactive` handles that report changes through the same
//!   notifier as the root.
//! - **Idempotent Wrapping**: storing an already-wrapped handle keeps its
//!   identity (same `Rc`), so repeated assignment of the same nested
//!   structure never re-wraps and self-referential graphs cannot cause an
//!   unbounded wrap cycle.
//! - **Lightweight**: `Reactive` is an `Rc` wrapper; clones share the same
//!   underlying map.
//!
//! ## Example
//!
//! ```
//! use solea_core::Reactive;
//! use serde_json::json;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let fired = Rc::new(Cell::new(0));
//! let state = Reactive::new(true);
//! let counter = Rc::clone(&fired);
//! state.on_change(move |_| counter.set(counter.get() + 1));
//!
//! state.set("count", json!(1));
//! state.set("count", json!(1)); // unchanged, does not fire
//! assert_eq!(fired.get(), 1);
//! ```

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A single reported state change.
///
/// `new_value` is `None` for deletions. Values are snapshots taken at the
/// time of the change; nested wrappers are snapshotted to plain objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
	/// The key that changed.
	pub key: String,
	/// Value before the change, if the key existed.
	pub old_value: Option<Value>,
	/// Value after the change; `None` when the key was deleted.
	pub new_value: Option<Value>,
}

type ChangeFn = dyn Fn(&Change);

/// The notifier cell is shared across every wrapper in one deep-wrap tree,
/// so replacing the callback on the root also rewires nested handles.
type Notifier = Rc<RefCell<Option<Rc<ChangeFn>>>>;

/// One stored entry: either a plain value or a nested wrapper.
enum Slot {
	Value(Value),
	Nested(Reactive),
}

impl Slot {
	fn snapshot(&self) -> Value {
		match self {
			Slot::Value(v) => v.clone(),
			Slot::Nested(r) => Value::Object(r.snapshot()),
		}
	}
}

struct Inner {
	deep: bool,
	entries: RefCell<BTreeMap<String, Slot>>,
	notifier: Notifier,
}

/// An observable keyed map with synchronous change notification.
pub struct Reactive {
	inner: Rc<Inner>,
}

impl Clone for Reactive {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl Reactive {
	/// Creates an empty wrapper with no callback attached.
	///
	/// `deep` enables recursive wrapping of object values.
	pub fn new(deep: bool) -> Self {
		Self {
			inner: Rc::new(Inner {
				deep,
				entries: RefCell::new(BTreeMap::new()),
				notifier: Rc::new(RefCell::new(None)),
			}),
		}
	}

	/// Creates a wrapper over `initial` with `on_change` attached.
	pub fn with_callback<F>(initial: Map<String, Value>, on_change: F, deep: bool) -> Self
	where
		F: Fn(&Change) + 'static,
	{
		let reactive = Self::new(deep);
		reactive.on_change(on_change);
		{
			let mut entries = reactive.inner.entries.borrow_mut();
			for (key, value) in initial {
				let slot = wrap(value, deep, &reactive.inner.notifier);
				entries.insert(key, slot);
			}
		}
		reactive
	}

	/// Attaches (or replaces) the change callback.
	///
	/// Nested wrappers created by deep mode share the same notifier, so they
	/// pick up the replacement as well.
	pub fn on_change<F>(&self, on_change: F)
	where
		F: Fn(&Change) + 'static,
	{
		*self.inner.notifier.borrow_mut() = Some(Rc::new(on_change));
	}

	/// Returns a snapshot of the value stored under `key`.
	///
	/// Nested wrappers are snapshotted to plain objects; use
	/// [`Reactive::get_nested`] for the live handle.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.inner.entries.borrow().get(key).map(Slot::snapshot)
	}

	/// Returns the live nested wrapper stored under `key`, if any.
	pub fn get_nested(&self, key: &str) -> Option<Reactive> {
		match self.inner.entries.borrow().get(key) {
			Some(Slot::Nested(r)) => Some(r.clone()),
			_ => None,
		}
	}

	/// Writes `value` under `key`.
	///
	/// In deep mode an object value is recursively wrapped before storing.
	/// The callback fires only if the stored value actually changed; a fresh
	/// deep-wrapped object always counts as changed (new identity), matching
	/// the interception semantics the render pipeline relies on.
	pub fn set(&self, key: &str, value: Value) {
		let new_slot = wrap(value, self.inner.deep, &self.inner.notifier);
		self.store(key, new_slot);
	}

	/// Stores an already-wrapped handle under `key` without re-wrapping.
	///
	/// Assigning the handle already stored under `key` is a no-op and does
	/// not fire the callback.
	pub fn set_reactive(&self, key: &str, child: &Reactive) {
		self.store(key, Slot::Nested(child.clone()));
	}

	fn store(&self, key: &str, new_slot: Slot) {
		let change = {
			let mut entries = self.inner.entries.borrow_mut();
			let (changed, old_value) = {
				let old = entries.get(key);
				let changed = match (old, &new_slot) {
					(Some(Slot::Value(a)), Slot::Value(b)) => a != b,
					(Some(Slot::Nested(a)), Slot::Nested(b)) => !a.ptr_eq(b),
					(Some(_), _) => true,
					(None, _) => true,
				};
				(changed, old.map(Slot::snapshot))
			};
			if !changed {
				return;
			}
			let new_value = Some(new_slot.snapshot());
			entries.insert(key.to_string(), new_slot);
			Change {
				key: key.to_string(),
				old_value,
				new_value,
			}
		};
		self.notify(&change);
	}

	/// Deletes `key`, returning whether it existed.
	///
	/// Deleting a present key fires the callback with `new_value: None`.
	pub fn delete(&self, key: &str) -> bool {
		let removed = self.inner.entries.borrow_mut().remove(key);
		match removed {
			Some(slot) => {
				let change = Change {
					key: key.to_string(),
					old_value: Some(slot.snapshot()),
					new_value: None,
				};
				self.notify(&change);
				true
			}
			None => false,
		}
	}

	/// Returns whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.entries.borrow().contains_key(key)
	}

	/// Number of top-level entries.
	pub fn len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.inner.entries.borrow().is_empty()
	}

	/// Snapshot of the whole map as plain JSON values.
	pub fn snapshot(&self) -> Map<String, Value> {
		self.inner
			.entries
			.borrow()
			.iter()
			.map(|(k, slot)| (k.clone(), slot.snapshot()))
			.collect()
	}

	/// Whether two handles refer to the same underlying map.
	pub fn ptr_eq(&self, other: &Reactive) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	fn notify(&self, change: &Change) {
		tracing::trace!(key = %change.key, deleted = change.new_value.is_none(), "state changed");
		// Clone the callback out of the cell so the callback itself may
		// replace it or mutate the map without a double borrow.
		let callback = self.inner.notifier.borrow().clone();
		if let Some(callback) = callback {
			callback(change);
		}
	}
}

/// Wraps a value for storage: in deep mode, object values become nested
/// wrappers sharing `notifier`; everything else is stored as-is.
fn wrap(value: Value, deep: bool, notifier: &Notifier) -> Slot {
	if !deep {
		return Slot::Value(value);
	}
	match value {
		Value::Object(map) => {
			let child = Reactive {
				inner: Rc::new(Inner {
					deep,
					entries: RefCell::new(BTreeMap::new()),
					notifier: Rc::clone(notifier),
				}),
			};
			{
				let mut entries = child.inner.entries.borrow_mut();
				for (key, value) in map {
					entries.insert(key, wrap(value, deep, notifier));
				}
			}
			Slot::Nested(child)
		}
		other => Slot::Value(other),
	}
}

impl fmt::Debug for Reactive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reactive")
			.field("deep", &self.inner.deep)
			.field("len", &self.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::cell::RefCell as StdRefCell;

	fn recording() -> (Reactive, Rc<StdRefCell<Vec<Change>>>) {
		let log: Rc<StdRefCell<Vec<Change>>> = Rc::new(StdRefCell::new(Vec::new()));
		let reactive = Reactive::new(true);
		let sink = Rc::clone(&log);
		reactive.on_change(move |change| sink.borrow_mut().push(change.clone()));
		(reactive, log)
	}

	#[test]
	fn test_set_fires_once_with_old_and_new() {
		let (state, log) = recording();
		state.set("count", json!(1));
		state.set("count", json!(2));

		let log = log.borrow();
		assert_eq!(log.len(), 2);
		assert_eq!(log[1].key, "count");
		assert_eq!(log[1].old_value, Some(json!(1)));
		assert_eq!(log[1].new_value, Some(json!(2)));
	}

	#[test]
	fn test_noop_write_never_fires() {
		let (state, log) = recording();
		state.set("name", json!("a"));
		state.set("name", json!("a"));
		assert_eq!(log.borrow().len(), 1);
	}

	#[test]
	fn test_delete_existing_fires_with_none() {
		let (state, log) = recording();
		state.set("k", json!(true));
		assert!(state.delete("k"));

		let log = log.borrow();
		assert_eq!(log.len(), 2);
		assert_eq!(log[1].old_value, Some(json!(true)));
		assert_eq!(log[1].new_value, None);
		assert!(!state.contains_key("k"));
	}

	#[test]
	fn test_delete_absent_is_silent() {
		let (state, log) = recording();
		assert!(!state.delete("missing"));
		assert!(log.borrow().is_empty());
	}

	#[test]
	fn test_deep_set_wraps_objects() {
		let (state, _log) = recording();
		state.set("user", json!({"name": "alice", "prefs": {"theme": "dark"}}));

		let user = state.get_nested("user").unwrap();
		let prefs = user.get_nested("prefs").unwrap();
		assert_eq!(prefs.get("theme"), Some(json!("dark")));
		assert_eq!(state.get("user"), Some(json!({"name": "alice", "prefs": {"theme": "dark"}})));
	}

	#[test]
	fn test_nested_write_fires_root_callback() {
		let (state, log) = recording();
		state.set("user", json!({"name": "alice"}));

		let user = state.get_nested("user").unwrap();
		user.set("name", json!("bob"));

		let log = log.borrow();
		assert_eq!(log.len(), 2);
		assert_eq!(log[1].key, "name");
		assert_eq!(log[1].new_value, Some(json!("bob")));
	}

	#[test]
	fn test_rewrap_is_identity() {
		let (state, log) = recording();
		state.set("user", json!({"name": "alice"}));
		let user = state.get_nested("user").unwrap();

		// Storing the handle we already hold keeps the identity and is silent.
		state.set_reactive("user", &user);
		assert_eq!(log.borrow().len(), 1);
		assert!(state.get_nested("user").unwrap().ptr_eq(&user));

		// Storing it under another key keeps the same identity too.
		state.set_reactive("alias", &user);
		assert!(state.get_nested("alias").unwrap().ptr_eq(&user));
	}

	#[test]
	fn test_fresh_object_write_always_fires() {
		let (state, log) = recording();
		state.set("user", json!({"name": "alice"}));
		// Equal contents, but a freshly wrapped object is a new identity.
		state.set("user", json!({"name": "alice"}));
		assert_eq!(log.borrow().len(), 2);
	}

	#[test]
	fn test_shallow_mode_stores_objects_plain() {
		let state = Reactive::new(false);
		state.set("user", json!({"name": "alice"}));
		assert!(state.get_nested("user").is_none());
		assert_eq!(state.get("user"), Some(json!({"name": "alice"})));
	}

	#[test]
	fn test_shallow_mode_object_write_dedups_by_value() {
		let log: Rc<StdRefCell<Vec<Change>>> = Rc::new(StdRefCell::new(Vec::new()));
		let state = Reactive::new(false);
		let sink = Rc::clone(&log);
		state.on_change(move |change| sink.borrow_mut().push(change.clone()));

		state.set("user", json!({"name": "alice"}));
		state.set("user", json!({"name": "alice"}));
		assert_eq!(log.borrow().len(), 1);
	}

	#[test]
	fn test_callback_replacement_reaches_nested_handles() {
		let state = Reactive::new(true);
		state.set("user", json!({"name": "alice"}));
		let user = state.get_nested("user").unwrap();

		let log: Rc<StdRefCell<Vec<String>>> = Rc::new(StdRefCell::new(Vec::new()));
		let sink = Rc::clone(&log);
		state.on_change(move |change| sink.borrow_mut().push(change.key.clone()));

		user.set("name", json!("bob"));
		assert_eq!(log.borrow().as_slice(), ["name"]);
	}

	#[test]
	fn test_with_callback_wraps_initial_data_silently() {
		let log: Rc<StdRefCell<Vec<Change>>> = Rc::new(StdRefCell::new(Vec::new()));
		let sink = Rc::clone(&log);
		let mut initial = Map::new();
		initial.insert("a".to_string(), json!(1));
		initial.insert("nested".to_string(), json!({"b": 2}));

		let state = Reactive::with_callback(initial, move |c| sink.borrow_mut().push(c.clone()), true);
		assert!(log.borrow().is_empty());
		assert_eq!(state.get("a"), Some(json!(1)));
		assert!(state.get_nested("nested").is_some());
	}
}
