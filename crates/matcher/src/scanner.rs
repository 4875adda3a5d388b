/// Positional comparison over code-unit slices.
///
/// Positions are expected to be clamped into `[0, text.len()]` already; out of
/// range values still return `false` instead of panicking.
pub struct CodeUnitScanner;

impl CodeUnitScanner {
    /// `text[pos..pos + pattern.len()] == pattern`
    #[must_use]
    pub fn starts_with(text: &[u16], pattern: &[u16], pos: usize) -> bool {
        let Some(end) = pos.checked_add(pattern.len()) else {
            return false;
        };
        text.get(pos..end) == Some(pattern)
    }

    /// `text[pos - pattern.len()..pos] == pattern`
    #[must_use]
    pub fn ends_with(text: &[u16], pattern: &[u16], pos: usize) -> bool {
        let Some(start) = pos.checked_sub(pattern.len()) else {
            return false;
        };
        text.get(start..pos) == Some(pattern)
    }

    /// First index `>= pos` where `pattern` occurs
    #[must_use]
    pub fn find_from(text: &[u16], pattern: &[u16], pos: usize) -> Option<usize> {
        if pos > text.len() {
            return None;
        }
        if pattern.is_empty() {
            return Some(pos);
        }
        text[pos..]
            .windows(pattern.len())
            .position(|window| window == pattern)
            .map(|offset| pos + offset)
    }

    /// `pattern` occurs at some index `>= pos`
    #[must_use]
    pub fn includes(text: &[u16], pattern: &[u16], pos: usize) -> bool {
        Self::find_from(text, pattern, pos).is_some()
    }
}
