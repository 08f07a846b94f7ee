use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

/// The result type used throughout the interpreter.
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Any error that occurs while tokenizing, compiling, or executing a line of input.
///
/// Unlike a general-purpose application error type this carries no source location or call
/// stack: the interpreter reports a single `Error: <reason>` line per aborted top-level input,
/// not a traceback.
#[derive(Clone)]
pub struct ScriptError {
    message: String,
}

impl Error for ScriptError {}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ScriptError {
    /// Create a new `ScriptError` with the given description.
    pub fn new(message: impl Into<String>) -> ScriptError {
        ScriptError {
            message: message.into(),
        }
    }

    /// Create a new `ScriptError` already wrapped in `Result::Err`.
    pub fn new_as_result<T>(message: impl Into<String>) -> Result<T> {
        Err(ScriptError::new(message))
    }

    /// The description of the error, without the leading `Error: ` tag the REPL adds when
    /// printing it.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        ScriptError::new(format!("I/O error: {}", error))
    }
}

/// Convenience for constructing an `Err(ScriptError)` from a `format!`-style message.
pub fn script_error<T>(message: String) -> Result<T> {
    ScriptError::new_as_result(message)
}

/// Convenience for constructing an `Err(ScriptError)` from a string literal.
pub fn script_error_str<T>(message: &str) -> Result<T> {
    script_error(message.to_string())
}
