//! Result type alias for INI language service operations

use crate::error::IniError;

/// Standard Result type for INI language service operations
pub type Result<T> = std::result::Result<T, IniError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Convert an error to `None` if it is recoverable
    fn recoverable(self) -> Result<Option<T>>;

    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Recoverable error: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        let ok: Result<u32> = Ok(1);
        assert_eq!(ok.recoverable().unwrap(), Some(1));

        let fix: Result<u32> = Err(IniError::inconsistent_nodes("foreign"));
        assert_eq!(fix.recoverable().unwrap(), None);

        let config: Result<u32> = Err(IniError::config_error("bad"));
        assert!(config.recoverable().is_err());
    }

    #[test]
    fn test_log_and_continue() {
        let err: Result<u32> = Err(IniError::invalid_edit("overlap"));
        assert_eq!(err.log_and_continue(), None);
        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.log_and_continue(), Some(7));
    }
}
