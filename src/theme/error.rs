//! Theme loading errors.

use std::path::PathBuf;

/// Error returned when a theme cannot be read or has the wrong shape.
///
/// Token resolution itself never fails; these errors surface only when a
/// caller loads theme configuration.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The theme is not valid JSON or does not match the expected shape.
    #[error("invalid JSON theme: {0}")]
    Json(#[from] serde_json::Error),
    /// The theme is not valid YAML or does not match the expected shape.
    #[error("invalid YAML theme: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported theme format for {}: expected .json, .yaml or .yml", path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_display() {
        let err = ThemeError::UnsupportedFormat {
            path: PathBuf::from("theme.toml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("theme.toml"));
        assert!(msg.contains(".yaml"));
    }

    #[test]
    fn test_io_error_display() {
        let err = ThemeError::Io {
            path: PathBuf::from("/missing/theme.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/theme.json"));
    }
}
