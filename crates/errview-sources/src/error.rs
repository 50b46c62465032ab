use std::fmt;

/// Result type for errview-sources operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading a source
#[derive(Debug)]
pub enum Error {
    /// The file could not be read or the network fetch failed (including timeouts)
    SourceUnavailable { location: String, reason: String },

    /// The document was read but does not have the expected structure
    MalformedData { location: String, reason: String },
}

impl Error {
    pub fn unavailable(location: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::SourceUnavailable {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(location: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::MalformedData {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Error::SourceUnavailable { location, .. } | Error::MalformedData { location, .. } => {
                location
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceUnavailable { location, reason } => {
                write!(f, "Source unavailable: {}: {}", location, reason)
            }
            Error::MalformedData { location, reason } => {
                write!(f, "Malformed data in {}: {}", location, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_location() {
        let err = Error::unavailable("/tmp/missing.json", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Source unavailable: /tmp/missing.json: No such file or directory"
        );
        assert_eq!(err.location(), "/tmp/missing.json");

        let err = Error::malformed("https://host/all_errors.json", "expected a map");
        assert!(err.to_string().starts_with("Malformed data in https://host/"));
    }
}
