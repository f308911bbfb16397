//! Reading UTF-8 and UTF-16 text streams as plain UTF-8.
//!
//! [`Reader`] sits in front of any [`Read`] implementation. On the first read
//! it looks for a byte order mark:
//!
//! | First bytes | Encoding  | What the reader does
//! |-------------|-----------|--------------------------------------------
//! |`EF BB BF`   | UTF-8     | skips the BOM
//! |`FF FE`      | UTF-16 LE | skips the BOM, transcodes the rest to UTF-8
//! |`FE FF`      | UTF-16 BE | skips the BOM, transcodes the rest to UTF-8
//! | other       | UTF-8     | passes everything through unchanged
//!
//! Nothing is validated for UTF-8 input: bytes that are not valid UTF-8 are
//! delivered as they are.
//!
//! ## Examples
//!
//! ```
//! use std::io::Read;
//!
//! let with_bom: &[u8] = b"\xEF\xBB\xBFabc";
//! let mut text = String::new();
//! utffile::wrap(with_bom).read_to_string(&mut text)?;
//! assert_eq!(text, "abc");
//!
//! // "abc" in UTF-16LE
//! let utf16: &[u8] = b"\xFF\xFEa\x00b\x00c\x00";
//! let mut text = String::new();
//! utffile::wrap(utf16).read_to_string(&mut text)?;
//! assert_eq!(text, "abc");
//! # Ok::<_, std::io::Error>(())
//! ```
//!
//! Files are opened with [`open`]. The returned reader can be [closed],
//! something that is only possible when the wrapped stream supports it.
//!
//! [closed]: Close::close

#![deny(missing_docs)]

pub mod close;
pub mod encoding;
pub mod errors;
pub mod reader;
mod utils;

use std::fs::File;
use std::io::Read;
use std::path::Path;

// reexports
pub use crate::close::Close;
pub use crate::encoding::Bom;
pub use crate::errors::{Error, Result};
pub use crate::reader::{Config, Reader};

/// Wraps a stream into a [`Reader`] with the default configuration.
///
/// The returned reader implements [`Close`] if and only if `reader` does.
#[inline]
pub fn wrap<R: Read>(reader: R) -> Reader<R> {
    Reader::from_reader(reader)
}

/// Opens a file for reading through a [`Reader`].
///
/// Errors of opening the file are returned in [`Error::Io`] unchanged.
#[inline]
pub fn open<P: AsRef<Path>>(path: P) -> Result<Reader<File>> {
    Reader::from_file(path)
}
