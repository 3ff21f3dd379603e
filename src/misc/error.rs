//! All structures involved in error management. It combines a list a Rust standard library
//! error types, used crates error types and a specific one to the application.
use std::io::ErrorKind;
use std::{fmt, io};

/// Error kind specific to an application error, different from standard errors.
#[derive(Debug, PartialEq)]
pub enum AppCustomErrorKind {
    MissingSeparator,
    InvalidConfiguration,
    LoggerInit,
}

/// A specific error type combining all possible error types in the app.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Regex(regex::Error),
    Yaml(serde_yaml::Error),
    App {
        err: AppCustomErrorKind,
        msg: String,
    },
    Context {
        msg: String,
        source: Box<AppError>,
    },
}

/// Shortcut for all fallible functions of the crate.
pub type AppResult<T> = Result<T, AppError>;

/// Wraps an error into a new one, adding a formatted message.
#[macro_export]
macro_rules! context {
    ($err:expr, $fmt:literal, $($arg:tt)*) => {
        $crate::misc::error::AppError::Context {
            msg: format!($fmt, $($arg)*),
            source: Box::new($crate::misc::error::AppError::from($err)),
        }
    };
}

impl AppError {
    /// A simple and convenient creation of a new application error
    pub fn new(err: AppCustomErrorKind, msg: &str) -> Self {
        AppError::App {
            err,
            msg: msg.to_string(),
        }
    }

    /// Returns the IO error kind branch if any, looking through contexts.
    pub fn get_ioerror(&self) -> Option<ErrorKind> {
        match self {
            AppError::Io(io_error) => Some(io_error.kind()),
            AppError::Context { source, .. } => source.get_ioerror(),
            _ => None,
        }
    }

    /// Returns the application error kind if any, looking through contexts.
    pub fn get_custom_kind(&self) -> Option<&AppCustomErrorKind> {
        match self {
            AppError::App { err, .. } => Some(err),
            AppError::Context { source, .. } => source.get_custom_kind(),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AppError::Io(ref err) => err.fmt(f),
            AppError::Regex(ref err) => err.fmt(f),
            AppError::Yaml(ref err) => err.fmt(f),
            AppError::App { ref err, ref msg } => write!(f, "{:?}: {}", err, msg),
            AppError::Context {
                ref msg,
                ref source,
            } => write!(f, "{}: {}", msg, source),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Regex(err) => Some(err),
            AppError::Yaml(err) => Some(err),
            AppError::App { .. } => None,
            AppError::Context { source, .. } => Some(source.as_ref()),
        }
    }
}

/// To simplify definition of all error conversions.
macro_rules! from_error {
    ($e:path, $f:path) => {
        impl From<$e> for AppError {
            fn from(err: $e) -> AppError {
                $f(err)
            }
        }
    };
}

from_error!(io::Error, AppError::Io);
from_error!(regex::Error, AppError::Regex);
from_error!(serde_yaml::Error, AppError::Yaml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display() {
        let io = io::Error::new(ErrorKind::NotFound, "No such file or directory");
        let err = context!(io, "unable to open source file {:?}", "ClientLog.txt");

        assert_eq!(
            err.to_string(),
            r#"unable to open source file "ClientLog.txt": No such file or directory"#
        );
        assert_eq!(err.get_ioerror(), Some(ErrorKind::NotFound));
        assert!(err.get_custom_kind().is_none());
    }

    #[test]
    fn custom_kind() {
        let err = AppError::new(AppCustomErrorKind::MissingSeparator, "line 3");
        assert_eq!(err.to_string(), "MissingSeparator: line 3");

        let wrapped = context!(err, "error reading {}", "foo.log");
        assert_eq!(
            wrapped.get_custom_kind(),
            Some(&AppCustomErrorKind::MissingSeparator)
        );
        assert!(wrapped.get_ioerror().is_none());
    }
}
