use pullrefresh_foundation::PointerId;
use std::fmt;

/// Errors surfaced by [`crate::PullRefreshLayout`].
///
/// Attachment and configuration errors are returned to the host immediately.
/// Pointer errors are recovered inside the controller and only ever logged.
#[derive(Debug, Clone, PartialEq)]
pub enum PullRefreshError {
    NotAttached { operation: &'static str },
    Configuration(ConfigurationError),
    InvalidPointer { id: Option<PointerId> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    TooManyChildren { count: usize },
    MissingChild { role: &'static str },
    DuplicateChild { role: &'static str },
    InvalidExtent { name: &'static str, value: f32 },
}

impl fmt::Display for PullRefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullRefreshError::NotAttached { operation } => {
                write!(f, "{operation} called before content and header were attached")
            }
            PullRefreshError::Configuration(error) => write!(f, "invalid configuration: {error}"),
            PullRefreshError::InvalidPointer { id: Some(id) } => {
                write!(f, "pointer {id} is not tracked by the current gesture")
            }
            PullRefreshError::InvalidPointer { id: None } => {
                write!(f, "pointer event arrived without an active pointer")
            }
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::TooManyChildren { count } => {
                write!(f, "pull layout hosts exactly two children, got {count}")
            }
            ConfigurationError::MissingChild { role } => write!(f, "missing {role} child"),
            ConfigurationError::DuplicateChild { role } => write!(f, "more than one {role} child"),
            ConfigurationError::InvalidExtent { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for PullRefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PullRefreshError::Configuration(error) => Some(error),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<ConfigurationError> for PullRefreshError {
    fn from(error: ConfigurationError) -> Self {
        PullRefreshError::Configuration(error)
    }
}

pub(crate) fn validate_extent(name: &'static str, value: f32) -> Result<f32, ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidExtent { name, value })
    }
}
