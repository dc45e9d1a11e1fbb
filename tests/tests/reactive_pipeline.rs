//! Reactive state driving the textual rendering pipeline.

use serde_json::json;
use solea_core::Reactive;
use solea_pages::{BufferSurface, Component, Surface, apply_edits, compute_edits};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_change_records_flow_to_observers() {
	let changes = Rc::new(RefCell::new(Vec::new()));
	let log = Rc::clone(&changes);
	let state = Reactive::new(true);
	state.on_change(move |change| {
		log.borrow_mut().push(change.clone());
	});

	state.set("count", json!(1));
	state.set("count", json!(2));
	state.set("count", json!(2)); // unchanged, no record

	let changes = changes.borrow();
	assert_eq!(changes.len(), 2);
	assert_eq!(changes[0].key, "count");
	assert_eq!(changes[0].old_value, None);
	assert_eq!(changes[0].new_value, Some(json!(1)));
	assert_eq!(changes[1].old_value, Some(json!(1)));
	assert_eq!(changes[1].new_value, Some(json!(2)));
}

#[test]
fn test_surface_updates_are_patches_not_rewrites() {
	struct RecordingSurface {
		buffer: BufferSurface,
		writes: Rc<RefCell<Vec<String>>>,
	}
	impl Surface for RecordingSurface {
		fn html(&self) -> String {
			self.buffer.html()
		}
		fn set_html(&self, html: &str) {
			self.writes.borrow_mut().push(html.to_string());
			self.buffer.set_html(html);
		}
	}

	let writes = Rc::new(RefCell::new(Vec::new()));
	let surface = Rc::new(RecordingSurface {
		buffer: BufferSurface::new(),
		writes: Rc::clone(&writes),
	});
	let component = Component::mount(surface.clone(), |_| {
		"<ul><li>{{first}}</li><li>{{second}}</li></ul>".to_string()
	});
	component.state().set("first", json!("a"));
	component.state().set("second", json!("b"));
	assert_eq!(surface.html(), "<ul><li>a</li><li>b</li></ul>");

	// Each write is the patched result of an edit script over the previous
	// content, equivalent to recomputing from scratch.
	let writes = writes.borrow();
	let mut previous = String::new();
	for written in writes.iter() {
		let ops = compute_edits(&previous, written);
		assert_eq!(&apply_edits(&previous, &ops), written);
		previous = written.clone();
	}
}

#[test]
fn test_deep_state_tree_renders_through_component() {
	let surface = BufferSurface::new();
	let component = Component::mount(Rc::new(surface.clone()), |_| {
		"profile: {{profile}}".to_string()
	});
	component
		.state()
		.set("profile", json!({"name": "alice", "tags": ["admin"]}));
	assert_eq!(
		surface.html(),
		"profile: {\"name\":\"alice\",\"tags\":[\"admin\"]}"
	);

	// A write deep in the nested wrapper still reaches the surface.
	let profile = component.state().get_nested("profile").unwrap();
	profile.set("name", json!("bob"));
	assert_eq!(
		surface.html(),
		"profile: {\"name\":\"bob\",\"tags\":[\"admin\"]}"
	);
}
