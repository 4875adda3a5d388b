use crate::case::Case;
use crate::error::Result;
use crate::parser::parse_cases;

/// Source text of the bundled case file
pub const BUNDLED_SUITE: &str = include_str!("../suites/string-matching.cases");

/// Parse the bundled case file
pub fn bundled_cases() -> Result<Vec<Case>> {
    parse_cases(BUNDLED_SUITE)
}
