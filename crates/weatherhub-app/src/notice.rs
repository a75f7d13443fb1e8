use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// `None` stays until dismissed or replaced.
    pub lifetime: Option<Duration>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            lifetime: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            lifetime: None,
        }
    }

    pub fn error(message: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            lifetime: Some(lifetime),
        }
    }

    pub fn is_expired(&self, elapsed: Duration) -> bool {
        self.lifetime.is_some_and(|lifetime| elapsed >= lifetime)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
