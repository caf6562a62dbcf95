//! Warning sink for recoverable problems.

use std::fmt;

/// A recoverable problem found while rendering one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// Entity the warning is about (e.g. `org.example.Foo.bar`).
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Collects warnings for a run and logs each one as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let warning = Warning {
            subject: subject.into(),
            message: message.into(),
        };
        tracing::warn!(member = %warning.subject, "{}", warning.message);
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
