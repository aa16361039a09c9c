use crate::{EditBlock, EditBlocks, EditType};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

const FENCE: &str = "```";
const MARKER_OPEN: &str = "<<<<<<<";
const MARKER_DIVIDER: &str = "=======";
const MARKER_CLOSE: &str = ">>>>>>>";

static RE_SEQUENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*edit_block:\s*(-?\d+)\s*$").unwrap());

/// Extracts the edit blocks found inside fenced sections of `input`, in order of appearance.
///
/// Text outside fences is ignored. Malformed blocks are recovered where possible (a Create or
/// Append block missing its `=======` divider keeps its lines as new lines) and otherwise
/// dropped with a warning, so this never fails.
pub fn extract_edit_blocks(input: &str) -> EditBlocks {
	let mut parser = Parser::default();
	for line in input.lines() {
		parser.push_line(line);
	}
	parser.finish()
}

// region:    --- Parser

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
	#[default]
	Idle,
	InOld,
	InNew,
}

#[derive(Debug, Default)]
struct Parser {
	blocks: Vec<EditBlock>,
	in_fence: bool,
	state: ParserState,
	/// Path line seen since the last block, if any.
	pending_path: Option<String>,
	/// Path of the last block opened in the current fence.
	fence_path: Option<String>,
	pending_sequence: Option<i64>,
	current: Option<EditBlock>,
}

impl Parser {
	fn push_line(&mut self, line: &str) {
		if line.starts_with(FENCE) {
			if self.current.is_some() {
				warn!("edit block not closed before fence boundary, dropping it");
			}
			self.reset_fence_state();
			self.in_fence = !self.in_fence;
			return;
		}

		if !self.in_fence {
			return;
		}

		match self.state {
			ParserState::Idle => self.push_idle_line(line),
			ParserState::InOld => {
				if line.starts_with(MARKER_DIVIDER) {
					self.state = ParserState::InNew;
				} else if line.starts_with(MARKER_CLOSE) {
					self.close_block();
				} else if let Some(block) = self.current.as_mut() {
					block.old_lines.push(line.to_string());
				}
			}
			ParserState::InNew => {
				if line.starts_with(MARKER_CLOSE) {
					self.close_block();
				} else if let Some(block) = self.current.as_mut() {
					block.new_lines.push(line.to_string());
				}
			}
		}
	}

	fn push_idle_line(&mut self, line: &str) {
		if line.starts_with(MARKER_OPEN) {
			self.open_block(line);
			return;
		}

		if let Some(caps) = RE_SEQUENCE.captures(line) {
			self.pending_sequence = caps[1].parse::<i64>().ok();
			return;
		}

		let trimmed = line.trim();
		if !trimmed.is_empty() && !trimmed.starts_with(MARKER_DIVIDER) && !trimmed.starts_with(MARKER_CLOSE) {
			self.pending_path = Some(trimmed.to_string());
		}
	}

	fn open_block(&mut self, marker_line: &str) {
		let edit_type = EditType::from_marker_line(marker_line);
		let file_path = self.pending_path.take().or_else(|| self.fence_path.clone());

		let file_path = match file_path {
			Some(path) => {
				self.fence_path = Some(path.clone());
				path
			}
			None => {
				warn!("edit block has no file path");
				String::new()
			}
		};

		let sequence_number = self.pending_sequence.take().unwrap_or(0);
		self.current = Some(EditBlock::new(file_path, edit_type).with_sequence_number(sequence_number));
		self.state = ParserState::InOld;
	}

	fn close_block(&mut self) {
		self.state = ParserState::Idle;
		let Some(mut block) = self.current.take() else {
			return;
		};

		if block.edit_type.takes_new_lines_only() && block.new_lines.is_empty() && !block.old_lines.is_empty() {
			warn!(
				file_path = %block.file_path,
				edit_type = %block.edit_type,
				"missing divider, treating block lines as new lines"
			);
			block.new_lines = std::mem::take(&mut block.old_lines);
		}

		debug!(
			file_path = %block.file_path,
			edit_type = %block.edit_type,
			sequence_number = block.sequence_number,
			old = block.old_lines.len(),
			new = block.new_lines.len(),
			"extracted edit block"
		);
		self.blocks.push(block);
	}

	fn reset_fence_state(&mut self) {
		self.state = ParserState::Idle;
		self.pending_path = None;
		self.fence_path = None;
		self.pending_sequence = None;
		self.current = None;
	}

	fn finish(self) -> EditBlocks {
		if self.current.is_some() {
			warn!("input ended inside an edit block, dropping it");
		}
		EditBlocks::new(self.blocks)
	}
}

// endregion: --- Parser

// region:    --- Tests


// endregion: --- Tests
