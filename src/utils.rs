use std::fmt::{self, Debug, Formatter};

/// Writes bytes as a quoted string, escaping everything that is not printable
/// ASCII as hexadecimal.
pub fn write_byte_string(f: &mut Formatter<'_>, byte_string: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for b in byte_string {
        match *b {
            32..=33 | 35..=126 => write!(f, "{}", *b as char)?,
            34 => write!(f, "\\\"")?,
            _ => write!(f, "{:#04X}", b)?,
        }
    }
    write!(f, "\"")?;
    Ok(())
}

/// Wrapper around a byte slice with a readable `Debug` representation.
pub(crate) struct Bytes<'a>(pub &'a [u8]);

impl<'a> Debug for Bytes<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_byte_string(f, self.0)
    }
}
