use editblocks::extract_edit_blocks;
use simple_fs::read_to_string;

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
	let file_path = "tests/data/blocks-mixed.md";
	let content = read_to_string(file_path)?;

	let blocks = extract_edit_blocks(&content).sorted_by_sequence();

	if blocks.is_empty() {
		println!("No edit blocks found in {file_path}");
		return Ok(());
	}

	for block in blocks.iter() {
		println!(
			"edit_block:{} {} {} (old: {}, new: {})",
			block.sequence_number,
			block.edit_type,
			block.file_path,
			block.old_lines.len(),
			block.new_lines.len()
		);
	}

	Ok(())
}
