use crate::{EditBlock, FileRange};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static RE_HUNK_HEADER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap());

/// One contiguous run of added/removed lines in a diff hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdit {
	/// 0-based line of the original file where the run begins.
	pub edit_start_line_number: usize,
	/// Added minus removed lines; negative for net deletions.
	pub net_lines_added: i64,
}

/// Extracts one `LineEdit` per contiguous `+`/`-` run from unified diff text.
/// Lines before the first hunk header (`---`/`+++` file headers) are ignored.
pub fn parse_line_edits(diff: &str) -> Vec<LineEdit> {
	let mut edits = Vec::new();
	let mut in_hunk = false;
	let mut orig_line = 0usize;
	let mut run: Option<LineEdit> = None;

	for line in diff.lines() {
		if let Some(caps) = RE_HUNK_HEADER.captures(line) {
			edits.extend(run.take());
			in_hunk = true;
			let start: usize = caps[1].parse().unwrap_or(0);
			orig_line = start.saturating_sub(1);
			// `-0,0` means insertion into an empty file; `-N,0` inserts after line N
			if caps.get(2).is_some_and(|len| len.as_str() == "0") {
				orig_line = start;
			}
			continue;
		}
		if !in_hunk {
			continue;
		}

		match line.as_bytes().first() {
			Some(b'+') | Some(b'-') => {
				let edit = run.get_or_insert(LineEdit {
					edit_start_line_number: orig_line,
					net_lines_added: 0,
				});
				if line.starts_with('+') {
					edit.net_lines_added += 1;
				} else {
					edit.net_lines_added -= 1;
					orig_line += 1;
				}
			}
			Some(b'\\') => {}
			_ => {
				edits.extend(run.take());
				orig_line += 1;
			}
		}
	}
	edits.extend(run.take());

	edits.retain(|e| e.net_lines_added != 0);
	edits
}

/// Shifts `range` by every edit starting at or before its endpoints (0-based comparison),
/// computing each endpoint's delta from its original value.
pub fn shift_file_range(range: &mut FileRange, edits: &[LineEdit]) {
	let shift = |line: usize| -> usize {
		let delta: i64 = edits
			.iter()
			.filter(|e| line.saturating_sub(1) >= e.edit_start_line_number)
			.map(|e| e.net_lines_added)
			.sum();
		(line as i64 + delta).max(1) as usize
	};

	let (start, end) = (shift(range.start_line), shift(range.end_line));
	trace!(
		file_path = %range.file_path,
		from = ?(range.start_line, range.end_line),
		to = ?(start, end.max(start)),
		"shifted visible range"
	);
	range.start_line = start;
	range.end_line = end.max(start);
}

/// Re-maps the visible ranges on `file_path` of every pending block after `diff` was applied.
pub fn update_pending_ranges(pending: &mut [EditBlock], file_path: &str, diff: &str) {
	let edits = parse_line_edits(diff);
	if edits.is_empty() {
		return;
	}
	for block in pending.iter_mut().filter(|b| b.file_path == file_path) {
		for range in block.visible_file_ranges.iter_mut().filter(|r| r.file_path == file_path) {
			shift_file_range(range, &edits);
		}
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;
	use crate::EditType;

	#[test]
	fn test_range_tracker_parse_line_edits_runs() -> Result<()> {
		// -- Setup & Fixtures
		let diff = "--- original\n+++ modified\n@@ -8,5 +8,7 @@\n l8\n l9\n+a\n+b\n+c\n l10\n-l11\n l12\n";

		// -- Exec
		let edits = parse_line_edits(diff);

		// -- Check
		assert_eq!(
			edits,
			vec![
				LineEdit {
					edit_start_line_number: 9,
					net_lines_added: 3
				},
				LineEdit {
					edit_start_line_number: 10,
					net_lines_added: -1
				},
			]
		);

		Ok(())
	}

	#[test]
	fn test_range_tracker_parse_line_edits_replacement_run() -> Result<()> {
		// -- Setup & Fixtures
		let diff = "@@ -1,3 +1,4 @@\n a\n-b\n+b1\n+b2\n c\n";

		// -- Exec
		let edits = parse_line_edits(diff);

		// -- Check
		assert_eq!(
			edits,
			vec![LineEdit {
				edit_start_line_number: 1,
				net_lines_added: 1
			}]
		);

		Ok(())
	}

	#[test]
	fn test_range_tracker_parse_line_edits_zero_length_original() -> Result<()> {
		// -- Setup & Fixtures
		// pure insertion after original line 12, no context lines
		let diff = "--- original\n+++ modified\n@@ -12,0 +13,2 @@\n+x\n+y\n";

		// -- Exec
		let edits = parse_line_edits(diff);

		// -- Check
		assert_eq!(
			edits,
			vec![LineEdit {
				edit_start_line_number: 12,
				net_lines_added: 2
			}]
		);

		Ok(())
	}

	#[test]
	fn test_range_tracker_update_pending_ranges() -> Result<()> {
		// -- Setup & Fixtures
		let mut pending = vec![
			EditBlock::new("a.go", EditType::Update).with_visible_range(20, 25),
			EditBlock::new("a.go", EditType::Update).with_visible_range(2, 5),
			EditBlock::new("b.go", EditType::Update).with_visible_range(20, 25),
		];
		let diff = "@@ -8,4 +8,7 @@\n l8\n l9\n+a\n+b\n+c\n l10\n l11\n";

		// -- Exec
		update_pending_ranges(&mut pending, "a.go", diff);

		// -- Check
		assert_eq!(pending[0].visible_file_ranges[0], FileRange::new("a.go", 23, 28));
		assert_eq!(pending[1].visible_file_ranges[0], FileRange::new("a.go", 2, 5));
		assert_eq!(pending[2].visible_file_ranges[0], FileRange::new("b.go", 20, 25));

		Ok(())
	}

	#[test]
	fn test_range_tracker_shift_multiple_edits_from_original() -> Result<()> {
		// -- Setup & Fixtures
		let mut range = FileRange::new("a.go", 10, 30);
		let edits = vec![
			LineEdit {
				edit_start_line_number: 4,
				net_lines_added: -2,
			},
			LineEdit {
				edit_start_line_number: 19,
				net_lines_added: 4,
			},
		];

		// -- Exec
		shift_file_range(&mut range, &edits);

		// -- Check
		assert_eq!((range.start_line, range.end_line), (8, 32));

		Ok(())
	}
}

// endregion: --- Tests
