use std::fmt;

/// The error type for every fallible operation in this crate.
///
/// Failures are always precondition violations: a radix or length out
/// of bounds, a digit that does not fit the radix, a value too large
/// for its encoding. The message names the parameter at fault. Nothing
/// is retried and nothing fails partway; an operation that returns
/// `Error` has produced no output.
#[derive(Debug)]
pub struct Error(String);

impl Error {
    pub fn new(why: &str) -> Self {
        Error(why.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}
