use crate::{CodeBlock, EditBlock};

/// The ordered edit blocks extracted from one agent response.
#[derive(Debug, Clone, Default)]
pub struct EditBlocks {
	blocks: Vec<EditBlock>,
}

impl EditBlocks {
	pub fn new(blocks: Vec<EditBlock>) -> Self {
		Self { blocks }
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	/// Stable sort by `sequence_number`; blocks sharing a number keep their order of appearance.
	pub fn sorted_by_sequence(mut self) -> Self {
		self.blocks.sort_by_key(|b| b.sequence_number);
		self
	}

	/// Gives each block the new lines of every block before it as visible code blocks.
	pub fn with_running_code_blocks(self) -> Self {
		let (blocks, _) = self.blocks.into_iter().fold(
			(Vec::new(), Vec::<CodeBlock>::new()),
			|(mut out, prefix), mut block| {
				let next_prefix: Vec<CodeBlock> =
					prefix.iter().cloned().chain(std::iter::once(block.as_code_block())).collect();
				block.visible_code_blocks.extend(prefix);
				out.push(block);
				(out, next_prefix)
			},
		);
		Self { blocks }
	}
}

// region:    --- Iterators

impl EditBlocks {
	pub fn iter(&self) -> std::slice::Iter<'_, EditBlock> {
		self.blocks.iter()
	}
}

impl IntoIterator for EditBlocks {
	type Item = EditBlock;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.blocks.into_iter()
	}
}

impl<'a> IntoIterator for &'a EditBlocks {
	type Item = &'a EditBlock;
	type IntoIter = std::slice::Iter<'a, EditBlock>;

	fn into_iter(self) -> Self::IntoIter {
		self.blocks.iter()
	}
}

impl From<Vec<EditBlock>> for EditBlocks {
	fn from(blocks: Vec<EditBlock>) -> Self {
		Self::new(blocks)
	}
}

// endregion: --- Iterators

// region:    --- Tests


// endregion: --- Tests
