use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[from(String, &String, &str)]
	Custom(String),

	// -- Matching
	#[display("No match found for the old lines in '{file_path}'.\n{details}")]
	NoMatch { file_path: String, details: String },

	#[display("Ambiguous match in '{file_path}'.\n{report}")]
	AmbiguousMatch { file_path: String, report: String },

	#[display("Edit block for '{file_path}' has no old lines to search for")]
	MissingOldLines { file_path: String },

	#[display("Edit block is not grounded in the context shown for '{file_path}'")]
	NotGrounded { file_path: String },

	// -- Files
	#[display("Cannot create '{file_path}': file already exists")]
	AlreadyExists { file_path: String },

	#[display("File '{file_path}' not found")]
	FileNotFound { file_path: String },

	#[display("Edit block has no file path")]
	MissingFilePath,

	#[display("Path '{path}' is outside of base dir '{base_dir}'")]
	SecurityViolation { path: String, base_dir: String },

	#[display("Cannot read file '{path}'. Cause: {cause}")]
	IoReadFile { path: String, cause: std::io::Error },

	#[display("Cannot write file '{path}'. Cause: {cause}")]
	IoWriteFile { path: String, cause: std::io::Error },

	#[display("Cannot create file '{path}'. Cause: {cause}")]
	IoCreateFile { path: String, cause: std::io::Error },

	#[display("Cannot delete file '{path}'. Cause: {cause}")]
	IoDeleteFile { path: String, cause: std::io::Error },

	// -- Validation
	#[display("Check failed for '{file_path}':\n{message}")]
	CheckFailed { file_path: String, message: String },

	#[display("{name} failed: {cause}")]
	Collaborator { name: &'static str, cause: String },

	// -- Externals
	#[from]
	Io(std::io::Error),

	#[from]
	SimpleFs(simple_fs::Error),
}

// region:    --- Constructors

impl Error {
	pub fn no_match(file_path: impl Into<String>, details: impl Into<String>) -> Self {
		Self::NoMatch {
			file_path: file_path.into(),
			details: details.into(),
		}
	}

	pub fn ambiguous_match(file_path: impl Into<String>, report: impl Into<String>) -> Self {
		Self::AmbiguousMatch {
			file_path: file_path.into(),
			report: report.into(),
		}
	}

	pub fn missing_old_lines(file_path: impl Into<String>) -> Self {
		Self::MissingOldLines {
			file_path: file_path.into(),
		}
	}

	pub fn not_grounded(file_path: impl Into<String>) -> Self {
		Self::NotGrounded {
			file_path: file_path.into(),
		}
	}

	pub fn already_exists(file_path: impl Into<String>) -> Self {
		Self::AlreadyExists {
			file_path: file_path.into(),
		}
	}

	pub fn file_not_found(file_path: impl Into<String>) -> Self {
		Self::FileNotFound {
			file_path: file_path.into(),
		}
	}

	pub fn security_violation(path: impl Into<String>, base_dir: impl Into<String>) -> Self {
		Self::SecurityViolation {
			path: path.into(),
			base_dir: base_dir.into(),
		}
	}

	pub fn io_read_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoReadFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_write_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoWriteFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_create_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoCreateFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_delete_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoDeleteFile {
			path: path.into(),
			cause,
		}
	}

	pub fn check_failed(file_path: impl Into<String>, message: impl Into<String>) -> Self {
		Self::CheckFailed {
			file_path: file_path.into(),
			message: message.into(),
		}
	}

	pub fn simple_fs(err: simple_fs::Error) -> Self {
		Self::SimpleFs(err)
	}

	pub fn collaborator(name: &'static str, cause: impl std::fmt::Display) -> Self {
		Self::Collaborator {
			name,
			cause: cause.to_string(),
		}
	}
}

// endregion: --- Constructors

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
