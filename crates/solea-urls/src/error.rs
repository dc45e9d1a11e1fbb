//! Error types for route table construction.
//!
//! Only configuration-time problems are errors; dispatch-time misses are
//! soft no-ops by design (a missing route must not blank the page).

use thiserror::Error;

/// Errors raised while compiling a route declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	/// The pattern string exceeds the allowed length.
	#[error("pattern length {len} exceeds maximum of {max} bytes")]
	PatternTooLong {
		/// Actual length in bytes.
		len: usize,
		/// Allowed maximum.
		max: usize,
	},
	/// The pattern has too many path segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Allowed maximum.
		max: usize,
	},
	/// The pattern failed to compile to a matcher.
	#[error("failed to compile pattern '{pattern}': {reason}")]
	Compile {
		/// The offending pattern.
		pattern: String,
		/// Compiler message.
		reason: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = RouteError::TooManySegments { count: 40, max: 32 };
		assert_eq!(
			err.to_string(),
			"pattern has 40 path segments, exceeding maximum of 32"
		);
	}
}
