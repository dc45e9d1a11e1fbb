//! String edit scripts: computation and application.
//!
//! [`compute_edits`] produces an ordered, non-overlapping list of
//! [`EditOp`]s that transform one string into another, and [`apply_edits`]
//! replays such a list. The scan is a locally-greedy single pass with
//! forward re-synchronization, not a shortest-edit-script diff: on a
//! mismatch, whichever side can re-synchronize by skipping fewer characters
//! is treated as the cheaper edit. Worst case is quadratic (one forward scan
//! per mismatch), an accepted tradeoff for small-to-medium markup fragments.
//!
//! Offsets are byte indices into the *original* string, always on char
//! boundaries because the scan compares whole chars.

/// A single replace operation, addressed in the original string's byte
/// index space. An empty `replace` is a deletion; `start == end` is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
	/// Byte offset where the replaced range starts.
	pub start: usize,
	/// Byte offset one past the replaced range.
	pub end: usize,
	/// Replacement text.
	pub replace: String,
}

/// Computes an edit script transforming `a` into `b`.
///
/// Ops come out in ascending, non-overlapping `start` order, and
/// `apply_edits(a, &compute_edits(a, b)) == b` holds for all inputs.
pub fn compute_edits(a: &str, b: &str) -> Vec<EditOp> {
	let a_chars: Vec<(usize, char)> = a.char_indices().collect();
	let b_chars: Vec<(usize, char)> = b.char_indices().collect();
	// Byte offset of char `idx`, or the string length once past the end.
	let a_end = |idx: usize| a_chars.get(idx).map_or(a.len(), |&(pos, _)| pos);
	let b_end = |idx: usize| b_chars.get(idx).map_or(b.len(), |&(pos, _)| pos);

	let mut ops = Vec::new();
	let mut i = 0;
	let mut j = 0;
	while i < a_chars.len() && j < b_chars.len() {
		if a_chars[i].1 == b_chars[j].1 {
			i += 1;
			j += 1;
			continue;
		}
		// Re-synchronization points: first occurrence of the other side's
		// current char.
		let mut ai = i;
		while ai < a_chars.len() && a_chars[ai].1 != b_chars[j].1 {
			ai += 1;
		}
		let mut bj = j;
		while bj < b_chars.len() && b_chars[bj].1 != a_chars[i].1 {
			bj += 1;
		}
		if ai - i < bj - j {
			if ai > i {
				ops.push(EditOp {
					start: a_chars[i].0,
					end: a_end(ai),
					replace: String::new(),
				});
			}
			i = ai;
		} else {
			if bj > j {
				let start = a_chars[i].0;
				ops.push(EditOp {
					start,
					end: start,
					replace: b[b_chars[j].0..b_end(bj)].to_string(),
				});
			}
			j = bj;
		}
	}
	if i < a_chars.len() {
		ops.push(EditOp {
			start: a_chars[i].0,
			end: a.len(),
			replace: String::new(),
		});
	}
	if j < b_chars.len() {
		ops.push(EditOp {
			start: a.len(),
			end: a.len(),
			replace: b[b_chars[j].0..].to_string(),
		});
	}
	ops
}

/// Applies an edit script to `s`.
///
/// Each op is addressed in the original string's coordinates; a running
/// offset corrects for the drift introduced by earlier ops. Ops whose
/// corrected range falls outside the string or off a char boundary are
/// skipped rather than panicking, keeping the no-throw contract of the
/// render path.
pub fn apply_edits(s: &str, ops: &[EditOp]) -> String {
	let mut out = s.to_string();
	let mut offset: isize = 0;
	for op in ops {
		let start = op.start as isize + offset;
		let end = op.end as isize + offset;
		if start < 0 || end < start || end as usize > out.len() {
			continue;
		}
		let (start, end) = (start as usize, end as usize);
		if !out.is_char_boundary(start) || !out.is_char_boundary(end) {
			continue;
		}
		out.replace_range(start..end, &op.replace);
		offset += op.replace.len() as isize - (op.end - op.start) as isize;
	}
	out
}
