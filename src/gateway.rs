//! Seams to the external collaborators consulted while applying a batch.
//!
//! The engine only calls these; implementations (git, linters, language servers) live with
//! the embedding application. All paths are the block paths as written by the agent.

use crate::{FileRange, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
	pub passed: bool,
	pub message: String,
}

impl CheckOutcome {
	pub fn passed() -> Self {
		Self {
			passed: true,
			message: String::new(),
		}
	}

	pub fn failed(message: impl Into<String>) -> Self {
		Self {
			passed: false,
			message: message.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofixOutcome {
	pub changed: bool,
	pub output: String,
}

/// Runs the configured verification on a file after it was mutated.
pub trait Checker {
	fn check(&self, file_path: &str) -> Result<CheckOutcome>;
}

/// Keeps checked changes isolated from later restores.
pub trait VersionControl {
	fn stage(&self, file_path: &str) -> Result<()>;

	/// Restores the file to its last staged or committed content.
	fn restore(&self, file_path: &str) -> Result<()>;

	/// Unified diff of the working copy against the staged content.
	fn diff(&self, file_path: &str) -> Result<String>;
}

/// Optional formatting or lint-fix pass run before checks.
pub trait Autofixer {
	fn run(&self, file_path: &str) -> Result<AutofixOutcome>;
}

/// Resolves where a named symbol currently lives, to refresh stale visible ranges.
pub trait SymbolLookup {
	fn resolve(&self, file_path: &str, symbol_name: &str) -> Result<Vec<FileRange>>;
}

/// The collaborators available for a batch. Any of them may be absent.
#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
	pub checker: Option<&'a dyn Checker>,
	pub version_control: Option<&'a dyn VersionControl>,
	pub autofixer: Option<&'a dyn Autofixer>,
	pub symbols: Option<&'a dyn SymbolLookup>,
}

impl<'a> Collaborators<'a> {
	pub fn with_checker(mut self, checker: &'a dyn Checker) -> Self {
		self.checker = Some(checker);
		self
	}

	pub fn with_version_control(mut self, version_control: &'a dyn VersionControl) -> Self {
		self.version_control = Some(version_control);
		self
	}

	pub fn with_autofixer(mut self, autofixer: &'a dyn Autofixer) -> Self {
		self.autofixer = Some(autofixer);
		self
	}

	pub fn with_symbols(mut self, symbols: &'a dyn SymbolLookup) -> Self {
		self.symbols = Some(symbols);
		self
	}
}

impl std::fmt::Debug for Collaborators<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Collaborators")
			.field("checker", &self.checker.is_some())
			.field("version_control", &self.version_control.is_some())
			.field("autofixer", &self.autofixer.is_some())
			.field("symbols", &self.symbols.is_some())
			.finish()
	}
}
