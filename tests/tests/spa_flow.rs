//! End-to-end flows: route dispatch mounting components whose reactive
//! state drives surface patches.

use serde_json::json;
use solea_core::Store;
use solea_pages::{BufferSurface, Component, Surface};
use solea_urls::{MemoryPlatform, Mode, Platform, Router, RouterOptions, Routes};
use std::cell::RefCell;
use std::rc::Rc;

/// The currently mounted page. Handlers swap it on navigation; dropping the
/// previous component detaches its state from the surface.
type PageSlot = Rc<RefCell<Option<Component>>>;

fn mount_user_page(slot: &PageSlot, surface: &BufferSurface, id: &str) {
	let component = Component::mount(Rc::new(surface.clone()), |_| {
		"<p>user {{id}}, {{views}} views</p>".to_string()
	});
	component.state().set("id", json!(id));
	component.state().set("views", json!(0));
	*slot.borrow_mut() = Some(component);
}

#[test]
fn test_navigation_mounts_component_and_state_patches_surface() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load_fragment("/");
	let surface = BufferSurface::new();
	let slot: PageSlot = Rc::new(RefCell::new(None));

	let routes = {
		let home_surface = surface.clone();
		let home_slot = Rc::clone(&slot);
		let user_surface = surface.clone();
		let user_slot = Rc::clone(&slot);
		Routes::new()
			.route("/", move |_| {
				let component = Component::mount(Rc::new(home_surface.clone()), |_| {
					"<h1>home</h1>".to_string()
				});
				*home_slot.borrow_mut() = Some(component);
			})
			.nest("/users", {
				Routes::new().route("/:id", move |ctx| {
					mount_user_page(&user_slot, &user_surface, &ctx.route_params["id"]);
				})
			})
	};

	let router = Router::new(routes, RouterOptions::default(), platform.clone()).unwrap();
	platform.run_pending();
	assert_eq!(surface.html(), "<h1>home</h1>");

	router.go("/users/42");
	platform.run_pending();
	assert_eq!(surface.html(), "<p>user 42, 0 views</p>");

	// Reactive write patches the surface without another dispatch.
	let page = slot.borrow();
	let component = page.as_ref().unwrap();
	component.state().set("views", json!(7));
	assert_eq!(surface.html(), "<p>user 42, 7 views</p>");
}

#[test]
fn test_fallback_page_reports_status() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load_fragment("/no/such/page");
	let surface = BufferSurface::new();
	let slot: PageSlot = Rc::new(RefCell::new(None));

	let routes = {
		let surface = surface.clone();
		let slot = Rc::clone(&slot);
		Routes::new().route("/", |_| {}).route("*404", move |ctx| {
			let component = Component::mount(Rc::new(surface.clone()), |_| {
				"<p>error {{status}}</p>".to_string()
			});
			component.state().set("status", json!(ctx.status));
			*slot.borrow_mut() = Some(component);
		})
	};

	let _router = Router::new(routes, RouterOptions::default(), platform.clone()).unwrap();
	platform.run_pending();
	assert_eq!(surface.html(), "<p>error 404</p>");
}

#[test]
fn test_repeat_navigation_to_same_address_dispatches_once() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load_fragment("/");
	let mounts = Rc::new(RefCell::new(0usize));

	let routes = {
		let mounts = Rc::clone(&mounts);
		Routes::new().route("/", |_| {}).route("/about", move |_| {
			*mounts.borrow_mut() += 1;
		})
	};

	let router = Router::new(routes, RouterOptions::default(), platform.clone()).unwrap();
	platform.run_pending();

	router.go("/about");
	platform.run_pending();
	router.go("/about");
	platform.run_pending();
	assert_eq!(*mounts.borrow(), 1);
}

#[test]
fn test_navigating_away_detaches_previous_page() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load_fragment("/users/1");
	let surface = BufferSurface::new();
	let slot: PageSlot = Rc::new(RefCell::new(None));
	let stale_state = Rc::new(RefCell::new(None));

	let routes = {
		let user_surface = surface.clone();
		let user_slot = Rc::clone(&slot);
		let home_surface = surface.clone();
		let home_slot = Rc::clone(&slot);
		Routes::new()
			.route("/users/:id", move |ctx| {
				mount_user_page(&user_slot, &user_surface, &ctx.route_params["id"]);
			})
			.route("/", move |_| {
				let component = Component::mount(Rc::new(home_surface.clone()), |_| {
					"<h1>home</h1>".to_string()
				});
				*home_slot.borrow_mut() = Some(component);
			})
	};

	let router = Router::new(routes, RouterOptions::default(), platform.clone()).unwrap();
	platform.run_pending();
	{
		let page = slot.borrow();
		*stale_state.borrow_mut() = Some(page.as_ref().unwrap().state().clone());
	}

	router.go("/");
	platform.run_pending();
	assert_eq!(surface.html(), "<h1>home</h1>");

	// The unmounted page's state no longer reaches the surface.
	let stale = stale_state.borrow();
	stale.as_ref().unwrap().set("views", json!(99));
	assert_eq!(surface.html(), "<h1>home</h1>");
}

#[test]
fn test_history_mode_flow_under_mount_root() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load("/app/", "", "");
	let visited = Rc::new(RefCell::new(Vec::new()));

	let routes = {
		let home = Rc::clone(&visited);
		let detail = Rc::clone(&visited);
		Routes::new()
			.route("/", move |ctx| home.borrow_mut().push(ctx.pathname.clone()))
			.route("/users/:id", move |ctx| {
				detail
					.borrow_mut()
					.push(format!("{}={}", ctx.pathname, ctx.route_params["id"]))
			})
	};
	let options = RouterOptions {
		mode: Mode::History,
		root: "/app".to_string(),
		listen: false,
	};
	let router = Router::new(routes, options, platform.clone()).unwrap();

	router.go("/users/5");
	assert_eq!(platform.path(), "/app/users/5");
	assert_eq!(
		visited.borrow().as_slice(),
		["/", "/users/5=5"]
	);
}

#[test]
fn test_store_carries_state_between_pages() {
	let platform = Rc::new(MemoryPlatform::new());
	platform.load_fragment("/login");
	let store = Store::new();

	let routes = {
		let login_store = store.clone();
		let profile_store = store.clone();
		let seen = Rc::new(RefCell::new(String::new()));
		let seen_out = Rc::clone(&seen);
		let routes = Routes::new()
			.route("/login", move |_| {
				login_store.set("session", json!({"user": "alice"}));
			})
			.route("/profile", move |_| {
				let proxy = profile_store.proxy("session").unwrap();
				let user = proxy.get("user").unwrap();
				*seen_out.borrow_mut() = user.as_str().unwrap().to_string();
			});
		(routes, seen)
	};
	let (routes, seen) = routes;

	let router = Router::new(routes, RouterOptions::default(), platform.clone()).unwrap();
	platform.run_pending();

	router.go("/profile");
	platform.run_pending();
	assert_eq!(seen.borrow().as_str(), "alice");
}
