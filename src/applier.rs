use crate::patch_applier::{BlockChange, apply_edit_block, unified_diff};
use crate::{
	ApplyReport, ApplyReports, Collaborators, EditBlock, EditBlocks, EditType, Error, MatchConfig, Result, is_grounded,
	update_pending_ranges,
};
use simple_fs::{SPath, read_to_string};
use std::fs;
use tracing::{debug, warn};

/// Batch policy for `apply_edit_blocks`.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
	pub match_config: MatchConfig,
	/// Reject Update blocks whose old lines are not backed by anything the agent was shown.
	pub require_grounding: bool,
	/// Compute matches and diffs without writing anything.
	pub dry_run: bool,
}

impl ApplyOptions {
	pub fn with_match_config(mut self, match_config: MatchConfig) -> Self {
		self.match_config = match_config;
		self
	}

	pub fn with_require_grounding(mut self, require_grounding: bool) -> Self {
		self.require_grounding = require_grounding;
		self
	}

	pub fn with_dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}
}

/// Applies `blocks` relative to `base_dir`, one at a time in sequence-number order.
///
/// Each applied block goes through the collaborators (autofix, check, stage). A failed check
/// reverts that block's file. The final diff of every kept block re-maps the visible ranges of
/// the blocks still pending on the same file. Per-block failures are reported, never raised.
pub fn apply_edit_blocks(
	base_dir: &SPath,
	blocks: EditBlocks,
	options: &ApplyOptions,
	collaborators: Collaborators<'_>,
) -> Result<ApplyReports> {
	if !base_dir.exists() || !base_dir.is_dir() {
		return Err(Error::Custom(format!("Base dir '{base_dir}' does not exist or is not a directory")));
	}

	let mut pending: Vec<EditBlock> = blocks.sorted_by_sequence().with_running_code_blocks().into_iter().collect();
	let mut items = Vec::with_capacity(pending.len());

	for idx in 0..pending.len() {
		let (done, rest) = pending.split_at_mut(idx + 1);
		let block = &done[idx];
		let report = apply_one(base_dir, block, options, &collaborators, rest);
		debug!(
			file_path = %report.file_path(),
			kind = report.kind(),
			applied = report.applied,
			"edit block processed"
		);
		items.push(report);
	}

	Ok(ApplyReports { items })
}

// region:    --- Support

fn apply_one(
	base_dir: &SPath,
	block: &EditBlock,
	options: &ApplyOptions,
	collaborators: &Collaborators<'_>,
	pending: &mut [EditBlock],
) -> ApplyReport {
	let mut report = ApplyReport::new(block.clone());

	if options.require_grounding && block.edit_type == EditType::Update && !is_grounded(block, &options.match_config)
	{
		report.fail(Error::not_grounded(&block.file_path).to_string());
		return report;
	}

	let change = match apply_edit_block(
		base_dir,
		block,
		&options.match_config,
		collaborators.symbols,
		options.dry_run,
	) {
		Ok(change) => change,
		Err(err) => {
			report.fail(err.to_string());
			return report;
		}
	};

	report.applied = true;
	report.initial_diff = Some(change.diff.clone());

	if options.dry_run {
		report.final_diff = Some(change.diff);
		return report;
	}

	match validate_change(block, &change, collaborators, &mut report) {
		Ok(()) => {
			if let Some(final_diff) = report.final_diff.as_deref() {
				update_pending_ranges(pending, &block.file_path, final_diff);
			}
		}
		Err(err) => {
			warn!(file_path = %block.file_path, %err, "change rejected, reverting");
			report.fail(err.to_string());
			if let Err(revert_err) = revert_change(block, &change, collaborators) {
				warn!(file_path = %block.file_path, %revert_err, "revert failed");
				report.fail(revert_err.to_string());
			}
		}
	}

	report
}

/// Runs autofix, check and staging on an applied change, recording the final diff on `report`.
fn validate_change(
	block: &EditBlock,
	change: &BlockChange,
	collaborators: &Collaborators<'_>,
	report: &mut ApplyReport,
) -> Result<()> {
	let file_path = block.file_path.as_str();
	let mut final_diff = change.diff.clone();

	if let Some(autofixer) = collaborators.autofixer
		&& block.edit_type != EditType::Delete
	{
		let outcome = autofixer.run(file_path)?;
		if outcome.changed {
			debug!(file_path, output = %outcome.output, "autofix changed file");
			let current = read_to_string(&change.full_path).map_err(Error::simple_fs)?;
			final_diff = unified_diff(change.before.as_deref().unwrap_or(""), &current);
		}
	}

	if let Some(version_control) = collaborators.version_control {
		let vcs_diff = version_control.diff(file_path)?;
		if !vcs_diff.trim().is_empty() {
			final_diff = vcs_diff;
		}
	}
	report.final_diff = Some(final_diff);

	if let Some(checker) = collaborators.checker {
		let outcome = checker.check(file_path)?;
		if !outcome.passed {
			return Err(Error::check_failed(file_path, outcome.message));
		}
	}

	if let Some(version_control) = collaborators.version_control {
		version_control.stage(file_path)?;
	}

	Ok(())
}

/// Puts the file back the way it was before the block: removes a created file, otherwise
/// restores through version control, or rewrites the previous content when there is none.
fn revert_change(block: &EditBlock, change: &BlockChange, collaborators: &Collaborators<'_>) -> Result<()> {
	match (&change.before, collaborators.version_control) {
		(None, _) => {
			if change.full_path.exists() {
				fs::remove_file(&change.full_path)
					.map_err(|err| Error::io_delete_file(change.full_path.to_string(), err))?;
			}
		}
		(Some(_), Some(version_control)) => version_control.restore(&block.file_path)?,
		(Some(before), None) => {
			fs::write(&change.full_path, before)
				.map_err(|err| Error::io_write_file(change.full_path.to_string(), err))?;
		}
	}
	Ok(())
}

// endregion: --- Support
