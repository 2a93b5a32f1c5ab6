//! Error types for sift.
//!
//! Search and CSV generation are total and never fail; errors only arise
//! from configuration loading and from the host environment during a
//! download.

use thiserror::Error;

/// Top-level result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Top-level error type for sift.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SiftError {
    fn from(e: toml::de::Error) -> Self {
        SiftError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(e: serde_json::Error) -> Self {
        SiftError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = SiftError::Export("host refused download".to_string());
        assert_eq!(err.to_string(), "export error: host refused download");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SiftError = io.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let err: SiftError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, SiftError::Config(_)));
    }
}
