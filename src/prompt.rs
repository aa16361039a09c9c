/// Instructions describing the edit-block format, to include in an agent's system prompt.
pub fn edit_block_format_instructions() -> &'static str {
	EDIT_BLOCK_FORMAT_INSTRUCTIONS
}

const EDIT_BLOCK_FORMAT_INSTRUCTIONS: &str = r#"To change files, answer with edit blocks inside a fenced code block.

Each edit block is:

```
edit_block:<N>
path/to/file.ext
<<<<<<< SEARCH
<the exact lines to replace, copied from the file>
=======
<the new lines>
>>>>>>> REPLACE
```

- `edit_block:<N>` is optional and sets the order blocks are applied in (default 0).
- The path line is optional after the first block of a fence; blocks without one reuse the last path.
- Use `<<<<<<< CREATE_FILE` with only new lines to create a file that does not exist yet.
- Use `<<<<<<< APPEND_TO_FILE` with only new lines to add to the end of an existing file.
- Use `<<<<<<< DELETE_FILE` with no lines to delete a file.
- The SEARCH lines must match exactly one place in the file. Include a few surrounding lines when the
  same code appears more than once. Do not start the SEARCH lines with a lone closing brace.
"#;

// region:    --- Tests


// endregion: --- Tests
