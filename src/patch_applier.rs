use crate::line_matcher::MatchTarget;
use crate::{EditBlock, EditType, Error, MatchConfig, Result, SymbolLookup, fs_guard, resolve_match};
use simple_fs::{SPath, ensure_file_dir, read_to_string};
use std::fs;
use std::io::Write as _;
use tracing::debug;

/// Content of a file before and after one block was applied.
#[derive(Debug, Clone)]
pub struct BlockChange {
	pub full_path: SPath,
	/// `None` when the block created the file.
	pub before: Option<String>,
	/// `None` when the block deleted the file.
	pub after: Option<String>,
	/// Unified diff of `before` to `after`.
	pub diff: String,
}

impl BlockChange {
	fn new(full_path: SPath, before: Option<String>, after: Option<String>) -> Self {
		let diff = unified_diff(before.as_deref().unwrap_or(""), after.as_deref().unwrap_or(""));
		Self {
			full_path,
			before,
			after,
			diff,
		}
	}
}

/// Applies a single edit block under `base_dir`.
///
/// Nothing is written when `dry_run` is set; the returned change still carries the diff.
pub fn apply_edit_block(
	base_dir: &SPath,
	block: &EditBlock,
	config: &MatchConfig,
	symbols: Option<&dyn SymbolLookup>,
	dry_run: bool,
) -> Result<BlockChange> {
	if block.file_path.trim().is_empty() {
		return Err(Error::MissingFilePath);
	}
	let full_path = fs_guard::resolve_in_base(base_dir, &block.file_path)?;

	let change = match block.edit_type {
		EditType::Create => {
			if full_path.exists() {
				return Err(Error::already_exists(&block.file_path));
			}
			let content = create_content(&block.new_lines);
			if !dry_run {
				ensure_file_dir(&full_path).map_err(Error::simple_fs)?;
				write_new_file(&full_path, &content)?;
			}
			BlockChange::new(full_path, None, Some(content))
		}

		EditType::Update => {
			let before = read_existing(&full_path, &block.file_path)?;
			let after = apply_update_to_content(&before, block, MatchTarget::LiveFile, config, symbols)?;
			if !dry_run {
				fs::write(&full_path, &after).map_err(|err| Error::io_write_file(full_path.to_string(), err))?;
			}
			BlockChange::new(full_path, Some(before), Some(after))
		}

		EditType::Append => {
			let before = read_existing(&full_path, &block.file_path)?;
			let after = append_content(&before, &block.new_lines);
			if !dry_run {
				fs::write(&full_path, &after).map_err(|err| Error::io_write_file(full_path.to_string(), err))?;
			}
			BlockChange::new(full_path, Some(before), Some(after))
		}

		EditType::Delete => {
			if !full_path.exists() || full_path.is_dir() {
				return Err(Error::file_not_found(&block.file_path));
			}
			// binary files still get deleted, just without a meaningful diff
			let before = read_to_string(&full_path).unwrap_or_default();
			if !dry_run {
				fs::remove_file(&full_path).map_err(|err| Error::io_delete_file(full_path.to_string(), err))?;
			}
			BlockChange::new(full_path, Some(before), None)
		}
	};

	debug!(
		file_path = %block.file_path,
		edit_type = %block.edit_type,
		dry_run,
		"applied edit block"
	);
	Ok(change)
}

// region:    --- Content Transforms

/// Replaces the span of `content` matched by the block's old lines with its new lines.
/// Lines outside the span, the line ending and the trailing newline are preserved.
pub fn apply_update_to_content(
	content: &str,
	block: &EditBlock,
	target: MatchTarget,
	config: &MatchConfig,
	symbols: Option<&dyn SymbolLookup>,
) -> Result<String> {
	let eol = detect_eol(content);
	let file_lines: Vec<String> = content.lines().map(String::from).collect();
	let found = resolve_match(block, &file_lines, target, config, symbols)?;

	let end = found.index + found.lines.len();
	let mut out: Vec<String> = Vec::with_capacity(file_lines.len() + block.new_lines.len());
	out.extend_from_slice(&file_lines[..found.index]);
	out.extend(block.new_lines.iter().cloned());
	out.extend_from_slice(&file_lines[end..]);

	Ok(join_lines(&out, eol, content.ends_with('\n')))
}

/// `existing` with exactly one line ending before the appended lines.
pub fn append_content(existing: &str, new_lines: &[String]) -> String {
	let eol = detect_eol(existing);
	let mut out = existing.trim_end_matches(['\n', '\r']).to_string();
	if !out.is_empty() {
		out.push_str(eol);
	}
	if !new_lines.is_empty() {
		out.push_str(&new_lines.join(eol));
		out.push_str(eol);
	}
	out
}

/// Content of a created file: new lines minus one trailing blank line, newline terminated.
pub fn create_content(new_lines: &[String]) -> String {
	let mut lines = new_lines;
	if let Some((last, rest)) = lines.split_last()
		&& last.trim().is_empty()
	{
		lines = rest;
	}
	if lines.is_empty() {
		return String::new();
	}
	let mut content = lines.join("\n");
	content.push('\n');
	content
}

pub fn unified_diff(before: &str, after: &str) -> String {
	diffy::create_patch(before, after).to_string()
}

// endregion: --- Content Transforms

// region:    --- Support

fn detect_eol(content: &str) -> &'static str {
	if content.contains("\r\n") { "\r\n" } else { "\n" }
}

fn join_lines(lines: &[String], eol: &str, trailing_newline: bool) -> String {
	if lines.is_empty() {
		return String::new();
	}
	let mut out = lines.join(eol);
	if trailing_newline {
		out.push_str(eol);
	}
	out
}

fn read_existing(full_path: &SPath, file_path: &str) -> Result<String> {
	if !full_path.exists() || full_path.is_dir() {
		return Err(Error::file_not_found(file_path));
	}
	read_to_string(full_path).map_err(Error::simple_fs)
}

/// Creates the file exclusively so a concurrent creator is reported as `AlreadyExists`
/// instead of being overwritten.
fn write_new_file(full_path: &SPath, content: &str) -> Result<()> {
	let mut file = fs::OpenOptions::new()
		.write(true)
		.create_new(true)
		.open(full_path)
		.map_err(|err| match err.kind() {
			std::io::ErrorKind::AlreadyExists => Error::already_exists(full_path.to_string()),
			_ => Error::io_create_file(full_path.to_string(), err),
		})?;
	file.write_all(content.as_bytes())
		.map_err(|err| Error::io_write_file(full_path.to_string(), err))?;
	Ok(())
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
