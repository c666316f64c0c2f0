use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A serializable error for client rendering.
///
/// When `RUST_BACKTRACE=1` is set, the message will include the full backtrace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    /// The error message (includes the context chain from anyhow's Debug output)
    pub message: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(report: anyhow::Error) -> Self {
        // The Debug representation includes the error chain and backtrace
        Self {
            message: format!("{:?}", report),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self {
            message: s.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self { message: s }
    }
}

impl Error {
    /// Hand the error to code that expects an `anyhow::Error`, such as the
    /// server bootstrap.
    pub fn into_anyhow(self) -> anyhow::Error {
        anyhow::Error::new(self)
    }
}

/// Build an [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from($crate::internal_anyhow_dont_use!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn keeps_context_chain() {
        let inner: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("connection reset"));
        let error: Error = inner.context("failed to load appointments").unwrap_err().into();

        assert!(error.message.contains("failed to load appointments"));
        assert!(error.message.contains("connection reset"));
    }

    #[test]
    fn err_macro_formats() {
        let error = crate::err!("unknown provider {}", "abc");
        assert!(error.to_string().starts_with("unknown provider abc"));
    }
}
