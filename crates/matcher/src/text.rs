use std::fmt;

/// Text stored as UTF-16 code units.
///
/// Every index used by the matcher counts code units, so a character outside
/// the BMP occupies two positions and a lone surrogate is a valid element.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeUnits(Vec<u16>);

impl CodeUnits {
    /// Create an empty text
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw code units without validation
    #[must_use]
    pub const fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    /// Length in code units
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode into a Rust string, replacing unpaired surrogates with U+FFFD
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for CodeUnits {
    fn from(text: &str) -> Self {
        Self(text.encode_utf16().collect())
    }
}

impl From<String> for CodeUnits {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<u16>> for CodeUnits {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl From<&[u16]> for CodeUnits {
    fn from(units: &[u16]) -> Self {
        Self(units.to_vec())
    }
}

impl PartialEq<str> for CodeUnits {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for CodeUnits {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for CodeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for CodeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}
