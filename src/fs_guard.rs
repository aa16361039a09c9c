use crate::{Error, Result};
use simple_fs::SPath;

/// Resolves a block's file path against `base_dir`, rejecting paths that escape it.
pub fn resolve_in_base(base_dir: &SPath, file_path: &str) -> Result<SPath> {
	let target = SPath::new(file_path);
	let full_path = if target.is_absolute() {
		target
	} else {
		base_dir.join(file_path)
	};
	check_in_base(&full_path, base_dir)?;
	Ok(full_path.into_collapsed())
}

// region:    --- Support

fn check_in_base(target: &SPath, base_dir: &SPath) -> Result<()> {
	let base_dir = base_dir.clone().into_collapsed();
	let target = target.clone().into_collapsed();

	let base = base_dir.as_str().trim_end_matches('/');
	let inside = target.as_str() == base || target.as_str().starts_with(&format!("{base}/"));
	if !inside {
		return Err(Error::security_violation(target.to_string(), base_dir.to_string()));
	}

	Ok(())
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
