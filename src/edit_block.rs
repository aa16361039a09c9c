use derive_more::Display;

/// The kind of mutation an edit block requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EditType {
	Create,
	Update,
	Append,
	Delete,
}

impl EditType {
	/// Tag text recognized on a `<<<<<<<` marker line.
	pub const CREATE_TAG: &'static str = "CREATE_FILE";
	pub const APPEND_TAG: &'static str = "APPEND_TO_FILE";
	pub const DELETE_TAG: &'static str = "DELETE_FILE";

	/// Resolves the edit type from the text of an opening marker line.
	/// Anything without a known tag is an `Update` (`SEARCH`).
	pub fn from_marker_line(line: &str) -> Self {
		if line.contains(Self::CREATE_TAG) {
			Self::Create
		} else if line.contains(Self::APPEND_TAG) {
			Self::Append
		} else if line.contains(Self::DELETE_TAG) {
			Self::Delete
		} else {
			Self::Update
		}
	}

	/// Create and Append blocks carry only new lines.
	pub fn takes_new_lines_only(&self) -> bool {
		matches!(self, Self::Create | Self::Append)
	}
}

/// A 1-based, inclusive line window of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRange {
	pub file_path: String,
	pub start_line: usize,
	pub end_line: usize,
}

impl FileRange {
	/// Builds a range, swapping the bounds if given in reverse so `start_line <= end_line` holds.
	pub fn new(file_path: impl Into<String>, start_line: usize, end_line: usize) -> Self {
		let (start_line, end_line) = if start_line <= end_line {
			(start_line, end_line)
		} else {
			(end_line, start_line)
		};
		Self {
			file_path: file_path.into(),
			start_line,
			end_line,
		}
	}

	pub fn line_count(&self) -> usize {
		self.end_line - self.start_line + 1
	}

	/// True if the 1-based inclusive span `[start, end]` overlaps this range grown by `margin` on each side.
	pub fn overlaps_with_margin(&self, start: usize, end: usize, margin: usize) -> bool {
		let lo = self.start_line.saturating_sub(margin);
		let hi = self.end_line + margin;
		start <= hi && end >= lo
	}
}

/// A named snippet the agent had access to when authoring a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
	pub file_path: String,
	pub name: String,
	pub lines: Vec<String>,
}

/// One structured edit instruction extracted from agent output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBlock {
	pub file_path: String,
	pub old_lines: Vec<String>,
	pub new_lines: Vec<String>,
	pub edit_type: EditType,
	pub sequence_number: i64,
	pub visible_file_ranges: Vec<FileRange>,
	pub visible_code_blocks: Vec<CodeBlock>,
	/// Symbol the agent expected to see around the edit, refreshed through `SymbolLookup`.
	pub visible_symbol: Option<String>,
}

impl EditBlock {
	pub fn new(file_path: impl Into<String>, edit_type: EditType) -> Self {
		Self {
			file_path: file_path.into(),
			old_lines: Vec::new(),
			new_lines: Vec::new(),
			edit_type,
			sequence_number: 0,
			visible_file_ranges: Vec::new(),
			visible_code_blocks: Vec::new(),
			visible_symbol: None,
		}
	}

	pub fn with_old_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
		self.old_lines = lines.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_new_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
		self.new_lines = lines.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_sequence_number(mut self, sequence_number: i64) -> Self {
		self.sequence_number = sequence_number;
		self
	}

	pub fn with_visible_range(mut self, start_line: usize, end_line: usize) -> Self {
		let range = FileRange::new(self.file_path.clone(), start_line, end_line);
		self.visible_file_ranges.push(range);
		self
	}

	pub fn with_visible_symbol(mut self, symbol: impl Into<String>) -> Self {
		self.visible_symbol = Some(symbol.into());
		self
	}

	/// The block's new lines as a `CodeBlock` later blocks may reference.
	pub fn as_code_block(&self) -> CodeBlock {
		CodeBlock {
			file_path: self.file_path.clone(),
			name: format!("edit_block:{}", self.sequence_number),
			lines: self.new_lines.clone(),
		}
	}
}

// region:    --- Tests


// endregion: --- Tests
