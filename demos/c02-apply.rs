use editblocks::{ApplyOptions, Collaborators, apply_edit_blocks, extract_edit_blocks};
use simple_fs::{SPath, SaferRemoveOptions, ensure_dir, read_to_string, safer_remove_dir};

const FILE: &str = "tests/data/blocks-project.md";

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let base_dir = SPath::new("demos/.out/c02-apply");

	// -- Setup & Clean
	if base_dir.exists() {
		safer_remove_dir(
			&base_dir,
			SaferRemoveOptions::default().with_must_contain_any(&["demos/"]),
		)?;
	}
	ensure_dir(&base_dir)?;

	// -- Load and Extract
	let md_content = read_to_string(FILE)?;
	let blocks = extract_edit_blocks(&md_content);
	if blocks.is_empty() {
		println!("No edit blocks found in '{FILE}'");
		return Ok(());
	}
	println!("Found {} edit blocks in {FILE}", blocks.len());

	// -- Apply
	let options = ApplyOptions::default().with_require_grounding(true);
	let reports = apply_edit_blocks(&base_dir, blocks, &options, Collaborators::default())?;

	// -- Print Result
	println!("\nApplied edit blocks to: {base_dir}");
	print!("{reports}");

	Ok(())
}
