//! Defines the error types of the crate.
//!   - [`SymbolicError`] : the symbolic-algebra backend produced no result (rejected input, not initialized, panicked).
//!   - [`SettingsError`] : the [`Settings`](crate::settings::Settings) handed to the directive builder are inconsistent.
//!
//! Normalizing, scanning, classifying and translating never fail: malformed markup
//! degrades to a plain expression or a best-effort string instead of an error.

use std::fmt;

/// Result type for the [`SymbolicError`]
pub type SymbolicResult<T> = ::std::result::Result<T, SymbolicError>;
/// Result type for the [`SettingsError`]
pub type SettingsResult<T> = ::std::result::Result<T, SettingsError>;

/// The explicit "no symbolic result" signal returned by the symbolic-algebra boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    /// Translation left nothing to send to the backend.
    EmptyExpression,
    /// The backend failed to load its capability modules.
    NotInitialized(Box<str>),
    /// The backend rejected the expression; carries the backend's message.
    Backend(Box<str>),
    /// The backend panicked while computing.
    Panicked,
}

/// Inconsistent configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The primary variable is empty.
    EmptyPrimaryVariable,
    /// The primary variable must be a single letter, e.g. `x`.
    InvalidPrimaryVariable(Box<str>),
    /// The accumulator's integration variable can't be the primary variable.
    DummyVariableClash(Box<str>),
}

/// A generic error type covering any error the crate reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// a symbolic-computation failure
    Symbolic(SymbolicError),
    /// a configuration error
    Settings(SettingsError),
}

impl From<SymbolicError> for Error {
    fn from(e: SymbolicError) -> Self {
        Error::Symbolic(e)
    }
}
impl From<SettingsError> for Error {
    fn from(e: SettingsError) -> Self {
        Error::Settings(e)
    }
}


impl fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::SymbolicError::*;
        match *self {
            EmptyExpression =>
                write!(f, "nothing to send to the algebra backend"),
            NotInitialized(ref message) =>
                write!(f, "algebra backend failed to initialize: {}", message),
            Backend(ref message) =>
                write!(f, "algebra backend rejected the expression: {}", message),
            Panicked =>
                write!(f, "algebra backend panicked"),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::SettingsError::*;
        match *self {
            EmptyPrimaryVariable =>
                write!(f, "the primary variable can't be empty"),
            InvalidPrimaryVariable(ref name) =>
                write!(f, "the primary variable must be a single letter, found `{}`", name),
            DummyVariableClash(ref name) =>
                write!(f, "the accumulator variable `{}` is also the primary variable", name),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Symbolic(e) => fmt::Display::fmt(e, f),
            Error::Settings(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for SymbolicError {}
impl std::error::Error for SettingsError {}
impl std::error::Error for Error {}
