use derive_more::{AsRef, Display};

pub const UNTITLED: &str = "Untitled";

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Blank names become "Untitled".
    #[must_use]
    pub fn or_untitled(name: &str) -> Self {
        Self::new(name).unwrap_or_else(|_| Self::untitled())
    }

    #[must_use]
    pub fn untitled() -> Self {
        Name(UNTITLED.to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}
