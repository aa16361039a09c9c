//! Line-level text heuristics shared by the matcher and resolver.

use similar::TextDiff;

const COMMENT_PREFIXES: &[&str] = &["//", "/*", "*/", "--", "<!--", ";;", "\"\"\"", "'''"];

/// Collapses runs of whitespace into a single space for normalized comparison.
pub(crate) fn normalize_ws(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn is_blank(line: &str) -> bool {
	line.trim().is_empty()
}

/// Blank, or made only of closing delimiters (`}`, `)`, `]`) and whitespace.
/// Such lines recur everywhere and make poor anchors.
pub(crate) fn is_trivial(line: &str) -> bool {
	line.chars().all(|c| c.is_whitespace() || matches!(c, '}' | ')' | ']'))
}

/// Blank, or a comment-only line by common prefix heuristics.
pub(crate) fn is_comment_or_blank(line: &str) -> bool {
	if is_blank(line) {
		return true;
	}
	let trimmed = line.trim();
	if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
		return true;
	}
	// `*` continuation of a block comment, `#` shell/python comment (not `#[attr]` or `#include`)
	trimmed == "*" || trimmed.starts_with("* ") || trimmed == "#" || trimmed.starts_with("# ")
}

/// Similarity in `[0.0, 1.0]` between two lines.
///
/// Exact equality is `1.0`, equality after trimming is `0.999`, anything else is the
/// character-diff ratio of the whitespace-normalized lines.
pub fn line_similarity(a: &str, b: &str) -> f64 {
	if a == b {
		return 1.0;
	}
	let (a_trim, b_trim) = (a.trim(), b.trim());
	if a_trim == b_trim {
		return 0.999;
	}
	let (a_norm, b_norm) = (normalize_ws(a_trim), normalize_ws(b_trim));
	if a_norm == b_norm {
		return 0.999;
	}
	TextDiff::from_chars(a_norm.as_str(), b_norm.as_str()).ratio() as f64
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_line_text_is_trivial() -> Result<()> {
		assert!(is_trivial("  }"));
		assert!(is_trivial("\t})]"));
		assert!(is_trivial(""));
		assert!(!is_trivial("};"));
		assert!(!is_trivial("x }"));

		Ok(())
	}

	#[test]
	fn test_line_text_is_comment_or_blank() -> Result<()> {
		assert!(is_comment_or_blank("   "));
		assert!(is_comment_or_blank("  // note"));
		assert!(is_comment_or_blank("# heading comment"));
		assert!(is_comment_or_blank(" * doc line"));
		assert!(!is_comment_or_blank("#[derive(Debug)]"));
		assert!(!is_comment_or_blank("let x = 1; // trailing"));

		Ok(())
	}

	#[test]
	fn test_line_text_line_similarity() -> Result<()> {
		assert_eq!(line_similarity("\treturn 1", "\treturn 1"), 1.0);
		assert_eq!(line_similarity("\treturn 1", "    return 1"), 0.999);
		assert_eq!(line_similarity("let  a = 1;", "let a = 1;"), 0.999);
		assert!(line_similarity("let total = compute(a, b);", "let total = compute(a, c);") > 0.85);
		assert!(line_similarity("fn main() {", "struct Point;") < 0.5);

		Ok(())
	}
}

// endregion: --- Tests
