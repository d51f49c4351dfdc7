use std::fmt;

/// Requested pixel dimensions for generation, e.g. `"1024x1024"`.
///
/// The value is owned by the story pipeline that sizes each illustration;
/// this crate passes it through to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec(String);

impl SizeSpec {
    pub fn new(size: impl Into<String>) -> Self {
        SizeSpec(size.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SizeSpec {
    fn from(size: &str) -> Self {
        SizeSpec::new(size)
    }
}

impl From<String> for SizeSpec {
    fn from(size: String) -> Self {
        SizeSpec(size)
    }
}
