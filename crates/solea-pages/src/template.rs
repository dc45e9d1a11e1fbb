//! `{{name}}` template interpolation.
//!
//! Placeholders are `{{` + word characters + `}}`, resolved against a value
//! map. Misses degrade softly: a placeholder with no matching key is left
//! literally in the output. `\{{` escapes a literal `{{`.
//!
//! This is a manual scanner rather than a regex because the escape rule is a
//! negative lookbehind, which the `regex` crate does not support.

use serde_json::{Map, Value};

/// Interpolates `{{name}}` placeholders in `template` from `data`.
///
/// String values are inserted as-is; other values use their JSON rendering.
/// Unknown keys leave the placeholder untouched, and `\{{` becomes a
/// literal `{{`.
pub fn render_template(template: &str, data: &Map<String, Value>) -> String {
	let chars: Vec<char> = template.chars().collect();
	let mut out = String::with_capacity(template.len());
	let mut i = 0;
	while i < chars.len() {
		if chars[i] == '\\' && i + 2 < chars.len() && chars[i + 1] == '{' && chars[i + 2] == '{' {
			out.push_str("{{");
			i += 3;
			continue;
		}
		if chars[i] == '{' && i + 1 < chars.len() && chars[i + 1] == '{' {
			let mut k = i + 2;
			let mut name = String::new();
			while k < chars.len() && (chars[k].is_ascii_alphanumeric() || chars[k] == '_') {
				name.push(chars[k]);
				k += 1;
			}
			if !name.is_empty() && k + 1 < chars.len() && chars[k] == '}' && chars[k + 1] == '}' {
				match data.get(&name) {
					Some(value) => out.push_str(&value_text(value)),
					None => {
						// Soft miss: keep the placeholder literally.
						out.push_str("{{");
						out.push_str(&name);
						out.push_str("}}");
					}
				}
				i = k + 2;
				continue;
			}
		}
		out.push(chars[i]);
		i += 1;
	}
	out
}

fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
