use crate::line_text::{is_trivial, line_similarity};
use crate::{EditBlock, FileRange, MatchConfig, SymbolLookup};
use tracing::{debug, trace, warn};

/// Score given to an anchor hit that only matches after trimming.
const TRIMMED_ANCHOR_SCORE: f64 = 0.999;

/// What the old lines are being matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTarget {
	/// The current content of the file on disk; visibility filtering applies.
	LiveFile,
	/// A snippet from chat history; never filtered.
	Snippet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorHit {
	/// 0-based line index in the searched file.
	pub file_index: usize,
	pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSearch {
	/// Index in the old lines of the anchor that produced the hits.
	/// Old lines before it were skipped and have to be recovered by the resolver.
	pub anchor_index: usize,
	pub hits: Vec<AnchorHit>,
}

// region:    --- Visibility

/// Line windows a block's author could see, used to reject implausible live-file candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
	ranges: Vec<FileRange>,
}

impl Visibility {
	pub fn new(ranges: Vec<FileRange>) -> Self {
		Self { ranges }
	}

	/// Builds the visibility set for `block`, or `None` when no filtering applies.
	///
	/// Only ranges on the block's own file count. If the block names a symbol and a lookup is
	/// given, the symbol's current ranges are merged in so a moved symbol stays visible.
	pub fn for_block(block: &EditBlock, target: MatchTarget, symbols: Option<&dyn SymbolLookup>) -> Option<Self> {
		if target == MatchTarget::Snippet {
			return None;
		}

		let mut ranges: Vec<FileRange> = block
			.visible_file_ranges
			.iter()
			.filter(|r| r.file_path == block.file_path)
			.cloned()
			.collect();
		if ranges.is_empty() {
			return None;
		}

		if let (Some(symbol), Some(lookup)) = (block.visible_symbol.as_deref(), symbols) {
			match lookup.resolve(&block.file_path, symbol) {
				Ok(found) => {
					debug!(file_path = %block.file_path, symbol, count = found.len(), "refreshed symbol ranges");
					ranges.extend(found.into_iter().filter(|r| r.file_path == block.file_path));
				}
				Err(err) => warn!(file_path = %block.file_path, symbol, %err, "symbol lookup failed"),
			}
		}

		Some(Self { ranges })
	}

	pub fn ranges(&self) -> &[FileRange] {
		&self.ranges
	}

	/// True if the span of `len` lines starting at 0-based `start` touches any range grown by its margin.
	pub fn admits(&self, start: usize, len: usize, config: &MatchConfig) -> bool {
		let first = start + 1;
		let last = start + len.max(1);
		self.ranges
			.iter()
			.any(|r| r.overlaps_with_margin(first, last, config.visibility_margin(r.line_count())))
	}
}

// endregion: --- Visibility

/// Index of the first old line at or after `from` that is a usable anchor.
pub fn select_anchor(old_lines: &[String], from: usize) -> Option<usize> {
	old_lines
		.iter()
		.enumerate()
		.skip(from)
		.find(|(_, line)| !is_trivial(line))
		.map(|(idx, _)| idx)
}

pub fn find_anchor_hits(anchor: &str, file_lines: &[String], config: &MatchConfig) -> Vec<AnchorHit> {
	let exact: Vec<AnchorHit> = file_lines
		.iter()
		.enumerate()
		.filter(|(_, line)| line.as_str() == anchor)
		.map(|(file_index, _)| AnchorHit { file_index, score: 1.0 })
		.collect();
	if !exact.is_empty() {
		return exact;
	}

	let anchor_trimmed = anchor.trim();
	let trimmed: Vec<AnchorHit> = file_lines
		.iter()
		.enumerate()
		.filter(|(_, line)| line.trim() == anchor_trimmed)
		.map(|(file_index, _)| AnchorHit {
			file_index,
			score: TRIMMED_ANCHOR_SCORE,
		})
		.collect();
	if !trimmed.is_empty() {
		return trimmed;
	}

	file_lines
		.iter()
		.enumerate()
		.filter_map(|(file_index, line)| {
			let score = line_similarity(anchor, line);
			(score >= config.similarity_threshold).then_some(AnchorHit { file_index, score })
		})
		.collect()
}

/// Shortlists candidate anchor positions for `old_lines` in `file_lines`.
///
/// The anchor is the first old line that is not blank or closing delimiters only, falling
/// back to the first line. When it yields no (visible) hits, the next usable anchor is tried once.
pub fn find_candidate_anchors(
	old_lines: &[String],
	file_lines: &[String],
	config: &MatchConfig,
	visibility: Option<&Visibility>,
) -> AnchorSearch {
	if old_lines.is_empty() {
		return AnchorSearch::default();
	}

	let first = select_anchor(old_lines, 0).unwrap_or(0);
	let search = search_from_anchor(old_lines, file_lines, first, config, visibility);
	if !search.hits.is_empty() {
		return search;
	}

	match select_anchor(old_lines, first + 1) {
		Some(next) => {
			debug!(skipped = next, "no hits for first anchor, advancing to next anchor line");
			search_from_anchor(old_lines, file_lines, next, config, visibility)
		}
		None => search,
	}
}

// region:    --- Support

fn search_from_anchor(
	old_lines: &[String],
	file_lines: &[String],
	anchor_index: usize,
	config: &MatchConfig,
	visibility: Option<&Visibility>,
) -> AnchorSearch {
	let anchor = &old_lines[anchor_index];
	let mut hits = find_anchor_hits(anchor, file_lines, config);
	trace!(anchor = %anchor, anchor_index, hits = hits.len(), "anchor search");

	if let Some(visibility) = visibility {
		let before = hits.len();
		hits.retain(|hit| {
			let start = hit.file_index.saturating_sub(anchor_index);
			visibility.admits(start, old_lines.len(), config)
		});
		if hits.len() != before {
			debug!(rejected = before - hits.len(), "visibility filter rejected anchor hits");
		}
	}

	AnchorSearch { anchor_index, hits }
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
