//! Key-value store with live object proxies.
//!
//! [`Store`] is an owned, explicitly constructed store instance: create one,
//! use it, drop it. The method surface (`set`/`get`/`get_all`/`rename`/
//! `exists`/`type_of`/`proxy`) replaces a stringly-typed action dispatch, so
//! misspelled operations are compile errors rather than runtime failures.
//!
//! The key `"*"` is reserved: [`Store::get_all`] is its read form, and
//! writes to it are rejected. Rejections and misses are soft (`false` /
//! `None`), never panics.

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// The reserved snapshot key.
const WILDCARD_KEY: &str = "*";

/// An owned key-value store over [`serde_json::Value`].
///
/// Clones share the same underlying data, which is what lets
/// [`StoreProxy`] handles stay live.
#[derive(Clone, Default)]
pub struct Store {
	data: Rc<RefCell<Map<String, Value>>>,
}

impl Store {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` under `key`. Returns `false` for the reserved `"*"` key.
	pub fn set(&self, key: &str, value: Value) -> bool {
		if key == WILDCARD_KEY {
			tracing::debug!("write to reserved store key rejected");
			return false;
		}
		self.data.borrow_mut().insert(key.to_string(), value);
		true
	}

	/// Returns a clone of the value under `key`.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.data.borrow().get(key).cloned()
	}

	/// Returns a snapshot of the whole store (the `"*"` read).
	pub fn get_all(&self) -> Map<String, Value> {
		self.data.borrow().clone()
	}

	/// Moves the value under `from` to `to`, removing `from`.
	///
	/// Returns `false` if `from` is absent or `to` is the reserved key.
	pub fn rename(&self, from: &str, to: &str) -> bool {
		if to == WILDCARD_KEY {
			return false;
		}
		let mut data = self.data.borrow_mut();
		match data.remove(from) {
			Some(value) => {
				data.insert(to.to_string(), value);
				true
			}
			None => false,
		}
	}

	/// Whether `key` is present.
	pub fn exists(&self, key: &str) -> bool {
		self.data.borrow().contains_key(key)
	}

	/// JSON type name of the value under `key`, if present.
	pub fn type_of(&self, key: &str) -> Option<&'static str> {
		self.data.borrow().get(key).map(|value| match value {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Object(_) => "object",
		})
	}

	/// Returns a live handle to the object stored under `key`.
	///
	/// An absent key is initialized to an empty object first. Returns `None`
	/// for the reserved key or when the existing value is not an object.
	pub fn proxy(&self, key: &str) -> Option<StoreProxy> {
		if key == WILDCARD_KEY {
			return None;
		}
		{
			let mut data = self.data.borrow_mut();
			match data.get(key) {
				None => {
					data.insert(key.to_string(), Value::Object(Map::new()));
				}
				Some(Value::Object(_)) => {}
				Some(_) => return None,
			}
		}
		Some(StoreProxy {
			data: Rc::clone(&self.data),
			key: key.to_string(),
		})
	}
}

impl std::fmt::Debug for Store {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Store").field("len", &self.data.borrow().len()).finish()
	}
}

/// A live handle to one object entry of a [`Store`].
///
/// Reads and writes go straight through to the stored object, so changes made
/// through the proxy are visible to `Store::get` and vice versa. If the entry
/// is later removed or replaced by a non-object, the handle degrades to soft
/// misses: reads return `None` and writes are no-ops.
#[derive(Clone)]
pub struct StoreProxy {
	data: Rc<RefCell<Map<String, Value>>>,
	key: String,
}

impl StoreProxy {
	/// The store key this handle points at.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Reads `field` from the proxied object.
	pub fn get(&self, field: &str) -> Option<Value> {
		match self.data.borrow().get(&self.key) {
			Some(Value::Object(map)) => map.get(field).cloned(),
			_ => None,
		}
	}

	/// Writes `field` into the proxied object.
	pub fn set(&self, field: &str, value: Value) {
		if let Some(Value::Object(map)) = self.data.borrow_mut().get_mut(&self.key) {
			map.insert(field.to_string(), value);
		}
	}

	/// Removes `field` from the proxied object, returning whether it existed.
	pub fn delete(&self, field: &str) -> bool {
		match self.data.borrow_mut().get_mut(&self.key) {
			Some(Value::Object(map)) => map.remove(field).is_some(),
			_ => false,
		}
	}

	/// Snapshot of the proxied object.
	pub fn snapshot(&self) -> Map<String, Value> {
		match self.data.borrow().get(&self.key) {
			Some(Value::Object(map)) => map.clone(),
			_ => Map::new(),
		}
	}
}

impl std::fmt::Debug for StoreProxy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StoreProxy").field("key", &self.key).finish()
	}
}
