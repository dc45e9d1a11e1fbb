//! Path pattern compilation and matching.
//!
//! Patterns use `:name` placeholders for dynamic path segments:
//!
//! - `/users/` - exact match
//! - `/users/:id` - single parameter (one or more non-`/` characters)
//! - `/users/:id/:tab` - multiple parameters
//! - `*` - matches every pathname
//!
//! Compiled matchers are anchored at both ends; parameters are extracted
//! positionally and zipped against the `:name` list in left-to-right order.

use crate::error::RouteError;
use std::collections::HashMap;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled matcher (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled anchored matcher.
	regex: regex::Regex,
	/// Parameter names in left-to-right order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`RouteError`] if the pattern exceeds the length or segment
	/// limits, or compiles to an oversized matcher.
	pub fn new(pattern: &str) -> Result<Self, RouteError> {
		// Reject oversized patterns up front to keep matcher compilation
		// bounded.
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(RouteError::PatternTooLong {
				len: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}
		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(RouteError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let (regex_str, param_names) = compile_pattern(pattern);
		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| RouteError::Compile {
				pattern: pattern.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Whether this pattern accepts `path`.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Attempts to match `path`, returning extracted parameters.
	///
	/// The ordered `:name` list is zipped against the positional capture
	/// groups.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.enumerate()
				.filter_map(|(idx, name)| {
					caps.get(idx + 1)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Compiles a pattern into a regex source and its ordered parameter names.
fn compile_pattern(pattern: &str) -> (String, Vec<String>) {
	if pattern == "*" {
		return (String::from("^.*$"), Vec::new());
	}

	let mut regex_str = String::from("^");
	let mut param_names = Vec::new();
	let mut chars = pattern.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			':' => {
				let mut param = String::new();
				while let Some(&next) = chars.peek() {
					if next.is_ascii_alphanumeric() || next == '_' {
						param.push(next);
						chars.next();
					} else {
						break;
					}
				}
				if param.is_empty() {
					// A bare ':' is a literal.
					regex_str.push(':');
				} else {
					param_names.push(param);
					// One or more non-separator characters.
					regex_str.push_str("([^/]+)");
				}
			}
			'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' | '{'
			| '}' => {
				// Escape regex special characters so they match literally.
				regex_str.push('\\');
				regex_str.push(c);
			}
			_ => {
				regex_str.push(c);
			}
		}
	}

	regex_str.push('$');
	(regex_str, param_names)
}
