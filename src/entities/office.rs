use crate::error::{Error, Result};

/// An administration within a Twinfield organisation. Every request targets one office.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Office {
    code: String,
    name: Option<String>,
}

impl Office {
    #[must_use]
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
        }
    }

    /// Reads the office code from the `TWINFIELD_OFFICE` environment variable.
    pub fn from_env() -> Result<Self> {
        std::env::var("TWINFIELD_OFFICE")
            .map(Self::from_code)
            .map_err(|_| Error::Configuration("TWINFIELD_OFFICE not set".to_string()))
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}
