// Error taxonomy for the decoders in this crate.
//
// Every fatal condition is reported as a single typed `Error` carrying a
// human-readable context string (function name and parameter), never
// recovered from locally. See the module-level error handling design for the
// full propagation policy.

use std::fmt;

#[derive(Debug)]
pub enum Error {
	/// A caller-supplied slice or out-parameter is missing or already set.
	InvalidArgument(String),
	/// An index or offset would read past the end of the given buffer.
	OutOfBounds(String),
	/// A recognised field carries a value outside the versioned set this
	/// crate understands (unknown flag bits, unexpected value type, ...).
	Unsupported(String),
	/// A structural invariant failed (broken list link, crossed back-index
	/// range, non-monotonic slot boundaries, ...).
	Corruption(String),
	/// A fallible capacity reservation failed.
	OutOfMemory(String),
	/// The underlying byte source failed.
	Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidArgument(context) => write!(f, "invalid argument: {}", context),
			Error::OutOfBounds(context) => write!(f, "out of bounds: {}", context),
			Error::Unsupported(context) => write!(f, "unsupported: {}", context),
			Error::Corruption(context) => write!(f, "corruption detected: {}", context),
			Error::OutOfMemory(context) => write!(f, "out of memory: {}", context),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Io(err)
	}
}

impl From<std::collections::TryReserveError> for Error {
	fn from(err: std::collections::TryReserveError) -> Self {
		Error::OutOfMemory(err.to_string())
	}
}
