use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

use thiserror::Error;

pub type KResult<T> = std::result::Result<T, ErrorCode>;

#[derive(Error)]
pub struct ErrorCode {
    code: u16,
    display_text: String,
    // cause carries a wrapped foreign error (e.g. an `anyhow::Error`).
    cause: Option<Box<dyn std::error::Error + Sync + Send>>,
    backtrace: Option<ErrorCodeBacktrace>,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> String {
        self.cause
            .as_ref()
            .map(|cause| format!("{}\n{:?}", self.display_text, cause))
            .unwrap_or_else(|| self.display_text.clone())
    }

    pub fn from_std_error<T: std::error::Error>(error: T) -> Self {
        ErrorCode {
            code: 1999, // UnknownException
            display_text: error.to_string(),
            cause: None,
            backtrace: Some(ErrorCodeBacktrace::Origin(Arc::new(Backtrace::capture()))),
        }
    }

    pub fn create(
        code: u16,
        display_text: String,
        cause: Option<Box<dyn std::error::Error + Sync + Send>>,
        backtrace: Option<ErrorCodeBacktrace>,
    ) -> ErrorCode {
        ErrorCode {
            code,
            display_text,
            cause,
            backtrace,
        }
    }
}

impl std::fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Code: {}, displayText = {}.",
            self.code(),
            self.message(),
        )?;

        match self.backtrace.as_ref() {
            None => Ok(()), // no backtrace
            Some(backtrace) => match backtrace {
                ErrorCodeBacktrace::Origin(backtrace) => {
                    if backtrace.status() == BacktraceStatus::Disabled {
                        write!(f, "\n\n<Backtrace disabled by default. Please use RUST_BACKTRACE=1 to enable> ")
                    } else {
                        write!(f, "\n\n{}", backtrace)
                    }
                }
                ErrorCodeBacktrace::Serialized(backtrace) => write!(f, "\n\n{}", backtrace),
            },
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Code: {}, displayText = {}.",
            self.code(),
            self.message(),
        )
    }
}

#[derive(Clone)]
pub enum ErrorCodeBacktrace {
    Serialized(Arc<String>),
    Origin(Arc<Backtrace>),
}

impl std::fmt::Display for ErrorCodeBacktrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCodeBacktrace::Serialized(backtrace) => write!(f, "{}", backtrace),
            ErrorCodeBacktrace::Origin(backtrace) => write!(f, "{:?}", backtrace),
        }
    }
}

impl From<&str> for ErrorCodeBacktrace {
    fn from(s: &str) -> Self {
        Self::Serialized(Arc::new(s.to_string()))
    }
}

impl From<String> for ErrorCodeBacktrace {
    fn from(s: String) -> Self {
        Self::Serialized(Arc::new(s))
    }
}

impl From<Backtrace> for ErrorCodeBacktrace {
    fn from(bt: Backtrace) -> Self {
        Self::Origin(Arc::new(bt))
    }
}

impl From<Arc<Backtrace>> for ErrorCodeBacktrace {
    fn from(bt: Arc<Backtrace>) -> Self {
        Self::Origin(bt)
    }
}
