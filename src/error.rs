use colored::Colorize;
use std::fmt;

#[derive(Debug)]
pub enum DialerError {
    UnsupportedOs {
        operating_system: String,
    },
    InvalidProduct {
        value: String,
    },
    InvalidEnsure {
        value: String,
    },
    MissingField {
        field: String,
        reason: String,
    },
    InvalidField {
        field: String,
        value: String,
        message: String,
    },
    ConfigError {
        path: String,
        message: String,
    },
    IoError {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
    },
    Other(anyhow::Error),
}

impl DialerError {
    pub fn unsupported_os(operating_system: impl Into<String>) -> Self {
        Self::UnsupportedOs {
            operating_system: operating_system.into(),
        }
    }

    pub fn invalid_product(value: impl Into<String>) -> Self {
        Self::InvalidProduct {
            value: value.into(),
        }
    }

    pub fn invalid_ensure(value: impl Into<String>) -> Self {
        Self::InvalidEnsure {
            value: value.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn config_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io_error(
        operation: impl Into<String>,
        path: Option<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path,
            source,
        }
    }

    /// Short, uncolored description of the violated constraint
    pub fn constraint(&self) -> String {
        match self {
            Self::UnsupportedOs { operating_system } => {
                format!("Unsupported OS: {operating_system}")
            }
            Self::InvalidProduct { .. } => "product must be either ODS or CCS".to_string(),
            Self::InvalidEnsure { .. } => {
                "only installed is supported for the ensure parameter at this time".to_string()
            }
            Self::MissingField { field, reason } => format!("{field} {reason}"),
            Self::InvalidField { field, message, .. } => format!("{field} {message}"),
            Self::ConfigError { path, message } => format!("{path}: {message}"),
            Self::IoError {
                operation, source, ..
            } => format!("{operation}: {source}"),
            Self::Other(err) => err.to_string(),
        }
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOs { .. }
                | Self::InvalidProduct { .. }
                | Self::InvalidEnsure { .. }
                | Self::MissingField { .. }
                | Self::InvalidField { .. }
        )
    }
}

impl fmt::Display for DialerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOs { operating_system } => {
                writeln!(
                    f,
                    "{} Unsupported OS: {}",
                    "✗".red().bold(),
                    operating_system.yellow()
                )?;
                writeln!(f, "  {} Only Windows targets are supported", "→".blue())?;
                Ok(())
            }
            Self::InvalidProduct { value } => {
                writeln!(
                    f,
                    "{} product must be either ODS or CCS",
                    "✗".red().bold()
                )?;
                writeln!(f, "  {} Got: '{}'", "→".blue(), value.yellow())?;
                Ok(())
            }
            Self::InvalidEnsure { value } => {
                writeln!(
                    f,
                    "{} only installed is supported for the ensure parameter at this time",
                    "✗".red().bold()
                )?;
                writeln!(f, "  {} Got: '{}'", "→".blue(), value.yellow())?;
                Ok(())
            }
            Self::MissingField { field, reason } => {
                writeln!(f, "{} {} {}", "✗".red().bold(), field.yellow(), reason)?;
                Ok(())
            }
            Self::InvalidField {
                field,
                value,
                message,
            } => {
                writeln!(f, "{} {} {}", "✗".red().bold(), field.yellow(), message)?;
                writeln!(f, "  {} Got: '{}'", "→".blue(), value)?;
                Ok(())
            }
            Self::ConfigError { path, message } => {
                writeln!(f, "{} Configuration error", "✗".red().bold())?;
                writeln!(f, "  {} Path: {}", "→".blue(), path.yellow())?;
                writeln!(f, "  {} Error: {}", "→".blue(), message)?;
                Ok(())
            }
            Self::IoError {
                operation,
                path,
                source,
            } => {
                writeln!(
                    f,
                    "{} I/O error during: {}",
                    "✗".red().bold(),
                    operation.yellow()
                )?;
                if let Some(path) = path {
                    writeln!(f, "  {} Path: {}", "→".blue(), path)?;
                }
                writeln!(f, "  {} Error: {}", "→".blue(), source)?;
                Ok(())
            }
            Self::Other(err) => write!(f, "{} {}", "✗".red().bold(), err),
        }
    }
}

impl std::error::Error for DialerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DialerError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            operation: "unknown".to_string(),
            path: None,
            source: err,
        }
    }
}

impl From<anyhow::Error> for DialerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

pub type Result<T> = std::result::Result<T, DialerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages() {
        assert_eq!(
            DialerError::unsupported_os("Linux").constraint(),
            "Unsupported OS: Linux"
        );
        assert_eq!(
            DialerError::invalid_product("").constraint(),
            "product must be either ODS or CCS"
        );
        assert!(DialerError::invalid_ensure("absent")
            .constraint()
            .contains("only installed is supported"));
        assert_eq!(
            DialerError::missing_field("version", "must not be empty").constraint(),
            "version must not be empty"
        );
    }

    #[test]
    fn test_display_contains_constraint() {
        let err = DialerError::invalid_product("XYZ");
        let rendered = err.to_string();
        assert!(rendered.contains("product must be either ODS or CCS"));
        assert!(rendered.contains("XYZ"));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(DialerError::unsupported_os("Darwin").is_validation_error());
        assert!(!DialerError::config_error("a.json", "bad").is_validation_error());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!DialerError::from(io).is_validation_error());
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DialerError::io_error("read request", Some("req.json".to_string()), io);
        assert!(err.source().is_some());
        assert!(DialerError::invalid_ensure("").source().is_none());
    }
}
