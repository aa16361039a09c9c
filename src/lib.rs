// region:    --- Modules

mod applier;
mod apply_report;
mod edit_block;
mod edit_blocks;
mod error;
mod extract;
mod fs_guard;
mod gateway;
mod line_matcher;
mod line_text;
mod match_config;
mod match_resolver;
mod patch_applier;
mod range_tracker;

#[cfg(feature = "prompt")]
mod prompt;

pub use applier::*;
pub use apply_report::*;
pub use edit_block::*;
pub use edit_blocks::*;
pub use error::*;
pub use extract::*;
pub use gateway::*;
pub use line_matcher::*;
pub use line_text::line_similarity;
pub use match_config::*;
pub use match_resolver::*;
pub use patch_applier::*;
pub use range_tracker::*;

#[cfg(feature = "prompt")]
pub use prompt::*;

// endregion: --- Modules

// region:    --- Test Support

#[cfg(feature = "test-support")]
pub mod for_test {
	use crate::{EditBlock, EditType, MatchConfig, MatchTarget, Result, append_content, apply_update_to_content};
	use crate::{unified_diff, update_pending_ranges};

	/// Applies the Update and Append blocks of one file in memory, in the given order,
	/// re-mapping the visible ranges of later blocks after each one.
	/// Returns the final content and the blocks as they looked when each was applied.
	pub fn apply_blocks_to_content(content: &str, blocks: Vec<EditBlock>) -> Result<(String, Vec<EditBlock>)> {
		let config = MatchConfig::default();
		let mut content = content.to_string();
		let mut pending = blocks;
		let mut seen = Vec::with_capacity(pending.len());

		for idx in 0..pending.len() {
			let (done, rest) = pending.split_at_mut(idx + 1);
			let block = &done[idx];
			let next = match block.edit_type {
				EditType::Update => apply_update_to_content(&content, block, MatchTarget::LiveFile, &config, None)?,
				EditType::Append => append_content(&content, &block.new_lines),
				EditType::Create | EditType::Delete => {
					return Err(format!("{} is not supported in memory", block.edit_type).into());
				}
			};
			let diff = unified_diff(&content, &next);
			update_pending_ranges(rest, &block.file_path, &diff);
			seen.push(block.clone());
			content = next;
		}

		Ok((content, seen))
	}
}

// endregion: --- Test Support
