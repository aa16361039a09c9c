use crate::EditBlock;
use std::fmt;

/// Per-block results of one batch, in application order.
#[derive(Debug, Clone, Default)]
pub struct ApplyReports {
	pub items: Vec<ApplyReport>,
}

#[derive(Debug, Clone)]
pub struct ApplyReport {
	pub block: EditBlock,
	pub applied: bool,
	pub error_msg: Option<String>,
	/// Diff of the block's own mutation.
	pub initial_diff: Option<String>,
	/// Diff after autofix, as reported by version control when available.
	pub final_diff: Option<String>,
}

impl ApplyReport {
	pub fn new(block: EditBlock) -> Self {
		Self {
			block,
			applied: false,
			error_msg: None,
			initial_diff: None,
			final_diff: None,
		}
	}

	pub fn file_path(&self) -> &str {
		if self.block.file_path.is_empty() {
			"unknown"
		} else {
			&self.block.file_path
		}
	}

	pub fn applied(&self) -> bool {
		self.applied
	}

	pub fn error_msg(&self) -> Option<&str> {
		self.error_msg.as_deref()
	}

	pub fn kind(&self) -> &'static str {
		match self.block.edit_type {
			crate::EditType::Create => "Create",
			crate::EditType::Update => "Update",
			crate::EditType::Append => "Append",
			crate::EditType::Delete => "Delete",
		}
	}

	/// Marks the block as not applied and appends `msg` to any existing error.
	pub fn fail(&mut self, msg: impl Into<String>) {
		self.applied = false;
		let msg = msg.into();
		self.error_msg = Some(match self.error_msg.take() {
			Some(prev) => format!("{prev}\n{msg}"),
			None => msg,
		});
	}
}

impl ApplyReports {
	pub fn all_applied(&self) -> bool {
		self.items.iter().all(|i| i.applied)
	}

	pub fn failures(&self) -> Vec<&ApplyReport> {
		self.items.iter().filter(|i| !i.applied).collect()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ApplyReport> {
		self.items.iter()
	}
}

impl fmt::Display for ApplyReports {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for item in &self.items {
			writeln!(f, "  - {:>6}: {:<5} {}", item.kind(), item.applied(), item.file_path())?;
			if let Some(err) = item.error_msg() {
				for line in err.lines() {
					writeln!(f, "      {line}")?;
				}
			}
		}
		Ok(())
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;
	use crate::EditType;

	#[test]
	fn test_apply_report_fail_appends() -> Result<()> {
		// -- Setup & Fixtures
		let mut report = ApplyReport::new(EditBlock::new("a.rs", EditType::Update));
		report.applied = true;

		// -- Exec
		report.fail("first");
		report.fail("second");

		// -- Check
		assert!(!report.applied());
		assert_eq!(report.error_msg(), Some("first\nsecond"));

		Ok(())
	}

	#[test]
	fn test_apply_report_display_summary() -> Result<()> {
		// -- Setup & Fixtures
		let mut ok = ApplyReport::new(EditBlock::new("a.rs", EditType::Create));
		ok.applied = true;
		let mut ko = ApplyReport::new(EditBlock::new("", EditType::Delete));
		ko.fail("File 'x' not found");
		let reports = ApplyReports { items: vec![ok, ko] };

		// -- Exec
		let out = reports.to_string();

		// -- Check
		assert!(out.contains("Create: true  a.rs"));
		assert!(out.contains("Delete: false unknown"));
		assert!(out.contains("File 'x' not found"));
		assert_eq!(reports.failures().len(), 1);

		Ok(())
	}
}

// endregion: --- Tests
