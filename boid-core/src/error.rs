use std::{error::Error, fmt};

/// Errors raised while building a simulation or loading its configuration.
///
/// Nothing in a running tick produces one of these; numeric edge cases inside
/// `step` are handled locally.
#[derive(Debug)]
pub enum FlockError {
    InvalidWorldSize { width: f64, height: f64 },
    InvalidParameter { name: &'static str, value: f64 },
    Config(serde_json::Error),
}

impl fmt::Display for FlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockError::InvalidWorldSize { width, height } => write!(
                f,
                "world size must be positive and finite (got {width} x {height})"
            ),
            FlockError::InvalidParameter { name, value } => {
                write!(f, "{name} must be positive and finite (got {value})")
            }
            FlockError::Config(err) => write!(f, "invalid flock configuration: {err}"),
        }
    }
}

impl Error for FlockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FlockError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FlockError {
    fn from(err: serde_json::Error) -> Self {
        FlockError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_parameter() {
        let err = FlockError::InvalidParameter {
            name: "max_speed",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "max_speed must be positive and finite (got -1)");
    }

    #[test]
    fn test_config_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FlockError::from(json_err);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid flock configuration"));
    }
}
