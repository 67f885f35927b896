use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Error surface for the boundary collaborators (dictionary files, the
/// versioning pipeline). The transducer itself is total and never reports
/// through this trait.
pub trait EwondoErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
}

impl fmt::Debug for dyn EwondoErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EWONDO | {} | {} | {}",
            self.level(),
            self.issuer(),
            self.message()
        )
    }
}

impl fmt::Display for dyn EwondoErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse Debug output for a consistent, human-friendly representation.
        write!(f, "{:?}", self)
    }
}
