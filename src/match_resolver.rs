use crate::line_matcher::{MatchTarget, Visibility, find_candidate_anchors};
use crate::line_text::{is_comment_or_blank, is_trivial, line_similarity};
use crate::{EditBlock, Error, MatchConfig, Result, SymbolLookup};
use std::fmt::Write as _;
use tracing::{debug, trace};

/// One scored alignment of a block's old lines against a file.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
	/// 0-based start line in the target file.
	pub index: usize,
	pub successful: bool,
	/// The file lines actually aligned, `[index, index + lines.len())`.
	pub lines: Vec<String>,
	pub score: f64,
	/// Fraction of lines above the high-confidence threshold.
	pub high_score_ratio: f64,
	pub failed_to_match: Vec<String>,
	pub found_instead: Vec<String>,
}

impl MatchCandidate {
	pub fn is_acceptable(&self, config: &MatchConfig) -> bool {
		self.successful && self.high_score_ratio > config.min_high_score_ratio
	}

	pub fn start_line(&self) -> usize {
		self.index + 1
	}

	pub fn end_line(&self) -> usize {
		self.index + self.lines.len().max(1)
	}
}

#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
	pub best: Option<MatchCandidate>,
	pub acceptable: Vec<MatchCandidate>,
}

impl MatchOutcome {
	pub fn is_ambiguous(&self) -> bool {
		self.acceptable.len() > 1
	}
}

/// A candidate widened until its context is unique in the file, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguatedCandidate {
	/// 1-based, inclusive.
	pub start_line: usize,
	pub end_line: usize,
	pub lines: Vec<String>,
}

/// Aligns `old_lines` against `file_lines` from an anchor hit and scores the alignment.
///
/// `anchor_pos` is the file index of the anchor hit and `anchor_index` the anchor's index in
/// `old_lines`. The start is first moved back over preceding blank or closing-delimiter file
/// lines that match the skipped old lines. Skipped old lines that could not be recovered count
/// against the high-score ratio unless they are blank or comment-only.
pub fn score_candidate(
	old_lines: &[String],
	file_lines: &[String],
	anchor_pos: usize,
	anchor_index: usize,
	config: &MatchConfig,
) -> MatchCandidate {
	let mut start = anchor_pos.min(file_lines.len());
	let mut recovered = 0;
	while recovered < anchor_index && start > 0 {
		let file_line = &file_lines[start - 1];
		let old_line = &old_lines[anchor_index - 1 - recovered];
		if !is_trivial(file_line) || line_similarity(old_line, file_line) < config.similarity_threshold {
			break;
		}
		start -= 1;
		recovered += 1;
	}

	let mut old_i = anchor_index - recovered;
	let skipped = old_lines[..old_i].iter().filter(|l| !is_comment_or_blank(l)).count();

	let mut file_i = start;
	let mut scored = 0usize;
	let mut high = 0usize;
	let mut total = 0.0;
	let mut successful = true;
	let mut failed_to_match = Vec::new();
	let mut found_instead = Vec::new();

	while old_i < old_lines.len() {
		let Some(file_line) = file_lines.get(file_i) else {
			successful = old_lines[old_i..].iter().all(|l| is_comment_or_blank(l));
			break;
		};
		let old_line = &old_lines[old_i];
		let similarity = line_similarity(old_line, file_line);

		if similarity < config.similarity_threshold {
			// blank/comment drift is skipped without scoring
			match (is_comment_or_blank(old_line), is_comment_or_blank(file_line)) {
				(true, false) => {
					old_i += 1;
					continue;
				}
				(false, true) => {
					file_i += 1;
					continue;
				}
				(true, true) => {
					old_i += 1;
					file_i += 1;
					continue;
				}
				(false, false) => {
					failed_to_match.push(old_line.clone());
					found_instead.push(file_line.clone());
				}
			}
		}

		scored += 1;
		total += similarity;
		if similarity > config.high_score_threshold {
			high += 1;
		}
		old_i += 1;
		file_i += 1;
	}

	let score = if scored > 0 { total / scored as f64 } else { 0.0 };
	let denominator = if successful { scored + skipped } else { old_lines.len() };
	let high_score_ratio = if denominator > 0 {
		high as f64 / denominator as f64
	} else {
		0.0
	};

	let end = file_i.min(file_lines.len());
	let candidate = MatchCandidate {
		index: start,
		successful,
		lines: file_lines[start..end].to_vec(),
		score,
		high_score_ratio,
		failed_to_match,
		found_instead,
	};
	trace!(
		index = candidate.index,
		successful,
		score,
		high_score_ratio,
		"scored candidate"
	);
	candidate
}

/// Picks the best candidate: successful over not, then higher score, then earliest.
///
/// # Panics
/// Panics if `candidates` is empty. Callers must only ask for a best match once at least one
/// candidate was scored; an empty shortlist is a `NoMatch`, not a best-match query.
pub fn find_best_match(candidates: &[MatchCandidate]) -> &MatchCandidate {
	assert!(
		!candidates.is_empty(),
		"find_best_match called with no candidates"
	);
	let mut best = &candidates[0];
	for candidate in &candidates[1..] {
		let better = match (candidate.successful, best.successful) {
			(true, false) => true,
			(false, true) => false,
			_ => candidate.score > best.score,
		};
		if better {
			best = candidate;
		}
	}
	best
}

/// Scores every shortlisted anchor hit and returns the best match with all acceptable ones.
/// More than one acceptable candidate means the caller must treat the match as ambiguous.
pub fn find_acceptable_match(
	old_lines: &[String],
	file_lines: &[String],
	config: &MatchConfig,
	visibility: Option<&Visibility>,
) -> MatchOutcome {
	let search = find_candidate_anchors(old_lines, file_lines, config, visibility);

	let mut candidates: Vec<MatchCandidate> = Vec::with_capacity(search.hits.len());
	for hit in &search.hits {
		let candidate = score_candidate(old_lines, file_lines, hit.file_index, search.anchor_index, config);
		if !candidates.iter().any(|c| c.index == candidate.index) {
			candidates.push(candidate);
		}
	}

	if candidates.is_empty() {
		return MatchOutcome::default();
	}

	let best = Some(find_best_match(&candidates).clone());
	let acceptable = candidates.into_iter().filter(|c| c.is_acceptable(config)).collect();
	MatchOutcome { best, acceptable }
}

/// Widens each ambiguous candidate until its surrounding context is the only acceptable
/// match for itself in the file, then one more step for readability.
///
/// Only used to report the ambiguity; never to pick a candidate.
pub fn expand_until_unambiguous(
	candidates: &[MatchCandidate],
	file_lines: &[String],
	config: &MatchConfig,
) -> Vec<DisambiguatedCandidate> {
	let rate = config.expand_rate.max(1);
	let file_len = file_lines.len();

	candidates
		.iter()
		.map(|candidate| {
			let mut lo = candidate.index.min(file_len);
			let mut hi = (candidate.index + candidate.lines.len()).min(file_len);

			loop {
				let grew = widen(&mut lo, &mut hi, rate, file_len);
				let window = &file_lines[lo..hi];
				let outcome = find_acceptable_match(window, file_lines, config, None);
				if outcome.acceptable.len() <= 1 || !grew {
					break;
				}
			}
			widen(&mut lo, &mut hi, rate, file_len);

			DisambiguatedCandidate {
				start_line: lo + 1,
				end_line: hi.max(lo + 1),
				lines: file_lines[lo..hi].to_vec(),
			}
		})
		.collect()
}

/// Resolves the single location `block` applies to in `file_lines`.
///
/// Returns `NoMatch` with the closest candidate's diagnostics when nothing is acceptable, and
/// `AmbiguousMatch` with every candidate expanded to distinguishable context when several are.
pub fn resolve_match(
	block: &EditBlock,
	file_lines: &[String],
	target: MatchTarget,
	config: &MatchConfig,
	symbols: Option<&dyn SymbolLookup>,
) -> Result<MatchCandidate> {
	if block.old_lines.is_empty() {
		return Err(Error::missing_old_lines(&block.file_path));
	}

	let visibility = Visibility::for_block(block, target, symbols);
	let mut outcome = find_acceptable_match(&block.old_lines, file_lines, config, visibility.as_ref());

	match outcome.acceptable.len() {
		1 => {
			let found = outcome.acceptable.remove(0);
			debug!(
				file_path = %block.file_path,
				start_line = found.start_line(),
				score = found.score,
				"resolved match"
			);
			Ok(found)
		}
		0 => Err(Error::no_match(
			&block.file_path,
			render_no_match_details(outcome.best.as_ref(), config),
		)),
		count => {
			debug!(file_path = %block.file_path, count, "ambiguous match");
			let expanded = expand_until_unambiguous(&outcome.acceptable, file_lines, config);
			Err(Error::ambiguous_match(
				&block.file_path,
				render_ambiguity_report(&block.file_path, &expanded),
			))
		}
	}
}

/// True when `block` is backed by something its author saw: it has no old lines, carries
/// visible file ranges, or its old lines match one of its visible code blocks.
pub fn is_grounded(block: &EditBlock, config: &MatchConfig) -> bool {
	if block.old_lines.is_empty() || !block.visible_file_ranges.is_empty() {
		return true;
	}
	block.visible_code_blocks.iter().any(|code_block| {
		let outcome = find_acceptable_match(&block.old_lines, &code_block.lines, config, None);
		!outcome.acceptable.is_empty()
	})
}

// region:    --- Reports

/// Human and agent readable explanation of why no candidate was acceptable.
pub fn render_no_match_details(best: Option<&MatchCandidate>, config: &MatchConfig) -> String {
	let Some(best) = best else {
		return "No line in the file resembles the old lines. Check the file path and copy the old lines exactly."
			.to_string();
	};

	let mut out = String::new();
	let _ = writeln!(
		out,
		"Closest candidate at line {} (score {:.3}, high-confidence ratio {:.3}, needs > {:.3}).",
		best.start_line(),
		best.score,
		best.high_score_ratio,
		config.min_high_score_ratio
	);
	if !best.successful {
		let _ = writeln!(out, "The file ended before all old lines were matched.");
	}
	if !best.failed_to_match.is_empty() {
		let _ = writeln!(out, "Lines that failed to match:");
		for (expected, found) in best.failed_to_match.iter().zip(&best.found_instead) {
			let _ = writeln!(out, "- expected: `{expected}`");
			let _ = writeln!(out, "  found:    `{found}`");
		}
	}
	out
}

/// Lists every ambiguous location with enough context to tell them apart.
pub fn render_ambiguity_report(file_path: &str, candidates: &[DisambiguatedCandidate]) -> String {
	let mut out = String::new();
	let _ = writeln!(
		out,
		"Found {} matches for the old lines. Include more surrounding lines to make the edit unique.",
		candidates.len()
	);
	for candidate in candidates {
		let _ = writeln!(out);
		let _ = writeln!(
			out,
			"{file_path} lines {}-{}:",
			candidate.start_line, candidate.end_line
		);
		let _ = writeln!(out, "```");
		for line in &candidate.lines {
			let _ = writeln!(out, "{line}");
		}
		let _ = writeln!(out, "```");
	}
	out
}

// endregion: --- Reports

// region:    --- Support

/// Grows `[lo, hi)` by `rate` on each side within `[0, len)`. Returns false if it could not grow.
fn widen(lo: &mut usize, hi: &mut usize, rate: usize, len: usize) -> bool {
	let (old_lo, old_hi) = (*lo, *hi);
	*lo = lo.saturating_sub(rate);
	*hi = (*hi + rate).min(len);
	*lo != old_lo || *hi != old_hi
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
