//! Location parsing under the two addressing modes.
//!
//! A [`Location`] snapshot is derived fresh on every dispatch and never
//! persisted. History addressing reads the platform's path/search/hash
//! directly, stripping the configured root prefix from the path. Hash
//! addressing parses the address fragment manually: the first `?` before
//! any `#` starts the search (terminated by a following `#`), the first
//! `#` starts the hash, and a fragment with neither is the whole pathname.

use crate::platform::Platform;

/// The addressing strategy for the application path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	/// The application path lives in the address fragment (`#/users/42`).
	#[default]
	Hash,
	/// The application path uses the platform's native path and history.
	History,
}

/// A parsed navigational location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// The application pathname.
	pub pathname: String,
	/// Query portion including `?`, or empty.
	pub search: String,
	/// Fragment portion including `#`, or empty.
	pub hash: String,
}

/// Parses the platform's current location under `mode`.
///
/// `root` applies in history mode only: it is stripped from the front of
/// the platform path (an empty remainder becomes `/`).
pub fn parse_location(platform: &dyn Platform, mode: Mode, root: &str) -> Location {
	match mode {
		Mode::History => Location {
			pathname: strip_root(&platform.path(), root),
			search: platform.search(),
			hash: platform.hash(),
		},
		Mode::Hash => parse_fragment(&platform.fragment()),
	}
}

/// Strips the root prefix from a platform path, normalizing the result to
/// a leading-slash pathname (`/` when nothing remains).
fn strip_root(path: &str, root: &str) -> String {
	let rest = path.strip_prefix(root).unwrap_or(path);
	if rest.is_empty() {
		"/".to_string()
	} else if rest.starts_with('/') {
		rest.to_string()
	} else {
		format!("/{rest}")
	}
}

/// Parses an address fragment into its pathname/search/hash parts.
fn parse_fragment(fragment: &str) -> Location {
	let idx_q = fragment.find('?');
	let idx_h = fragment.find('#');
	match (idx_q, idx_h) {
		(None, None) => Location {
			pathname: if fragment.is_empty() {
				"/".to_string()
			} else {
				fragment.to_string()
			},
			search: String::new(),
			hash: String::new(),
		},
		(Some(q), None) => Location {
			pathname: fragment[..q].to_string(),
			search: fragment[q..].to_string(),
			hash: String::new(),
		},
		(Some(q), Some(h)) if q < h => Location {
			pathname: fragment[..q].to_string(),
			search: fragment[q..h].to_string(),
			hash: fragment[h..].to_string(),
		},
		(_, Some(h)) => Location {
			pathname: fragment[..h].to_string(),
			search: String::new(),
			hash: fragment[h..].to_string(),
		},
	}
}
