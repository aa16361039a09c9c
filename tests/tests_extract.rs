//! Integration tests for extracting edit blocks from Markdown fixtures.

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

use editblocks::{EditBlock, EditType, extract_edit_blocks};

#[test]
fn test_extract_mixed_fixture_blocks() -> Result<()> {
	// -- Setup & Fixtures
	let input = include_str!("data/blocks-mixed.md");

	// -- Exec
	let blocks: Vec<EditBlock> = extract_edit_blocks(input).into_iter().collect();

	// -- Check
	let summary: Vec<(&str, EditType, i64)> = blocks
		.iter()
		.map(|b| (b.file_path.as_str(), b.edit_type, b.sequence_number))
		.collect();
	assert_eq!(
		summary,
		vec![
			("pkg/calc/calc.go", EditType::Update, 3),
			("pkg/calc/calc.go", EditType::Update, 0),
			("pkg/calc/calc_test.go", EditType::Create, 1),
			("NOTES.md", EditType::Append, 2),
			("legacy/old.go", EditType::Delete, 0),
		]
	);

	Ok(())
}

#[test]
fn test_extract_mixed_fixture_contents() -> Result<()> {
	// -- Setup & Fixtures
	let input = include_str!("data/blocks-mixed.md");

	// -- Exec
	let blocks: Vec<EditBlock> = extract_edit_blocks(input).into_iter().collect();

	// -- Check
	// tabs inside the old lines are kept verbatim
	assert_eq!(blocks[0].old_lines, vec!["func Add(a, b int) int {", "\treturn a - b", "}"]);
	assert_eq!(blocks[0].new_lines[1], "\treturn a + b");
	// second block in the fence reuses the fence path
	assert_eq!(blocks[1].old_lines, vec!["func Sub(a, b int) int {"]);
	assert_eq!(blocks[1].new_lines.len(), 2);
	// create without divider keeps its lines as new lines
	assert!(blocks[2].old_lines.is_empty());
	assert_eq!(blocks[2].new_lines, vec!["package calc", "", "import \"testing\""]);
	assert_eq!(blocks[3].new_lines, vec!["- calc: fixed Add"]);
	assert!(blocks[4].old_lines.is_empty() && blocks[4].new_lines.is_empty());

	Ok(())
}

#[test]
fn test_extract_mixed_fixture_sorted_with_running_code_blocks() -> Result<()> {
	// -- Setup & Fixtures
	let input = include_str!("data/blocks-mixed.md");

	// -- Exec
	let blocks: Vec<EditBlock> = extract_edit_blocks(input)
		.sorted_by_sequence()
		.with_running_code_blocks()
		.into_iter()
		.collect();

	// -- Check
	let order: Vec<i64> = blocks.iter().map(|b| b.sequence_number).collect();
	assert_eq!(order, vec![0, 0, 1, 2, 3]);
	assert_eq!(blocks[0].file_path, "pkg/calc/calc.go");
	assert_eq!(blocks[1].file_path, "legacy/old.go");
	for (idx, block) in blocks.iter().enumerate() {
		assert_eq!(block.visible_code_blocks.len(), idx, "block {idx} should see all earlier blocks");
	}
	assert_eq!(blocks[4].visible_code_blocks[2].name, "edit_block:1");
	assert_eq!(blocks[4].visible_code_blocks[2].lines, blocks[2].new_lines);

	Ok(())
}

#[test]
fn test_extract_project_fixture() -> Result<()> {
	// -- Setup & Fixtures
	let input = include_str!("data/blocks-project.md");

	// -- Exec
	let blocks = extract_edit_blocks(input);

	// -- Check
	assert_eq!(blocks.len(), 3);
	assert!(blocks.iter().all(|b| b.file_path == "src/main.rs"));
	let kinds: Vec<EditType> = blocks.iter().map(|b| b.edit_type).collect();
	assert_eq!(kinds, vec![EditType::Create, EditType::Update, EditType::Append]);

	Ok(())
}

#[test]
fn test_extract_no_fence_no_blocks() -> Result<()> {
	// -- Exec
	let blocks = extract_edit_blocks("Nothing to change here.\nAll good.\n");

	// -- Check
	assert!(blocks.is_empty());

	Ok(())
}
