/// Tunables for candidate search, scoring and disambiguation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
	/// Minimum per-line similarity for a line to count as matching. Default `0.85`.
	pub similarity_threshold: f64,
	/// Per-line similarity above which a line counts as a high-confidence match. Default `0.925`.
	pub high_score_threshold: f64,
	/// A match is acceptable only when its high-confidence ratio is strictly above this. Default `0.95`.
	pub min_high_score_ratio: f64,
	/// Lines added on each side per disambiguation step. Default `1`.
	pub expand_rate: usize,
	/// Visibility margin is `min(range_len / divisor, max)`. Default divisor `8`.
	pub visibility_margin_divisor: usize,
	/// Default `5`.
	pub visibility_margin_max: usize,
}

impl Default for MatchConfig {
	fn default() -> Self {
		Self {
			similarity_threshold: 0.85,
			high_score_threshold: 0.925,
			min_high_score_ratio: 0.95,
			expand_rate: 1,
			visibility_margin_divisor: 8,
			visibility_margin_max: 5,
		}
	}
}

impl MatchConfig {
	pub fn with_similarity_threshold(mut self, value: f64) -> Self {
		self.similarity_threshold = value;
		self
	}

	pub fn with_high_score_threshold(mut self, value: f64) -> Self {
		self.high_score_threshold = value;
		self
	}

	pub fn with_min_high_score_ratio(mut self, value: f64) -> Self {
		self.min_high_score_ratio = value;
		self
	}

	pub fn with_expand_rate(mut self, value: usize) -> Self {
		self.expand_rate = value.max(1);
		self
	}

	pub fn with_visibility_margin(mut self, divisor: usize, max: usize) -> Self {
		self.visibility_margin_divisor = divisor.max(1);
		self.visibility_margin_max = max;
		self
	}

	/// Margin, in lines, added on each side of a visible range of `range_len` lines.
	pub fn visibility_margin(&self, range_len: usize) -> usize {
		(range_len / self.visibility_margin_divisor.max(1)).min(self.visibility_margin_max)
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_match_config_visibility_margin() -> Result<()> {
		// -- Setup & Fixtures
		let config = MatchConfig::default();

		// -- Check
		assert_eq!(config.visibility_margin(6), 0);
		assert_eq!(config.visibility_margin(16), 2);
		assert_eq!(config.visibility_margin(400), 5);

		Ok(())
	}
}

// endregion: --- Tests
