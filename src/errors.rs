//! Error management module

use std::fmt;
use std::io;

use encoding_rs::Encoding;

/// The error type used by this crate.
#[derive(Debug)]
pub enum Error {
    /// An error originating from the underlying stream, kept as-is.
    Io(io::Error),
    /// Input after a UTF-16 BOM contains a sequence that is not valid UTF-16,
    /// such as an unpaired surrogate or a dangling odd byte at the end of the
    /// stream.
    ///
    /// Only returned when [`Config::replace_malformed`] is `false`.
    ///
    /// [`Config::replace_malformed`]: crate::Config::replace_malformed
    NonDecodable {
        /// Encoding announced by the BOM
        encoding: &'static Encoding,
        /// Offset of the first byte of the malformed sequence from the start
        /// of the stream, BOM included
        position: u64,
    },
}

/// A specialized `Result` type where the error is hard-wired to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::NonDecodable { encoding, position } => write!(
                f,
                "malformed {} sequence at position {}",
                encoding.name(),
                position
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    /// Creates a new `Error::Io` from the given error
    #[inline]
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<Error> for io::Error {
    /// Unwraps `Error::Io` back into the source error, other errors are
    /// reported as [`io::ErrorKind::InvalidData`] and can be recovered with
    /// [`io::Error::get_ref`] and a downcast to [`Error`].
    fn from(error: Error) -> io::Error {
        match error {
            Error::Io(e) => e,
            e => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_16BE;
    use pretty_assertions::assert_eq;

    #[test]
    fn io_error_roundtrips_unchanged() {
        let error: io::Error = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).into();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(error.to_string(), "gone");
    }

    #[test]
    fn decode_error_is_invalid_data() {
        let error: io::Error = Error::NonDecodable {
            encoding: UTF_16BE,
            position: 6,
        }
        .into();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        assert_eq!(error.to_string(), "malformed UTF-16BE sequence at position 6");

        match error.get_ref().and_then(|e| e.downcast_ref::<Error>()) {
            Some(Error::NonDecodable { encoding, position }) => {
                assert_eq!(*encoding, UTF_16BE);
                assert_eq!(*position, 6);
            }
            e => panic!("expected `NonDecodable`, but got {:?}", e),
        }
    }
}
