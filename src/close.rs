//! Explicit release of the underlying resource.

use std::fs::File;
use std::io::{self, BufReader};

/// A resource that can be released explicitly.
///
/// `close` consumes the value, so a resource is released at most once. A
/// [`Reader`] is `Close` exactly when the stream it wraps is, so calling
/// `close` on a reader over something that can't be closed does not compile:
///
/// ```compile_fail
/// use utffile::{Close, Reader};
///
/// let reader = Reader::from_reader(&b"abc"[..]);
/// reader.close();
/// ```
///
/// [`Reader`]: crate::Reader
pub trait Close {
    /// Releases the resource.
    fn close(self) -> io::Result<()>;
}

impl Close for File {
    /// Closes the file handle.
    ///
    /// The handle is released by dropping it, which does not report errors,
    /// so this always returns `Ok(())`. Call [`File::sync_all`] first if
    /// write errors matter.
    #[inline]
    fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

impl<R: Close> Close for BufReader<R> {
    /// Closes the underlying reader, dropping buffered data.
    #[inline]
    fn close(self) -> io::Result<()> {
        self.into_inner().close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reader;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::io::Read;
    use std::rc::Rc;

    /// Counts how many times it was closed
    struct Tracked {
        data: &'static [u8],
        closed: Rc<Cell<usize>>,
    }

    impl Read for Tracked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.data.read(buf)
        }
    }

    impl Close for Tracked {
        fn close(self) -> io::Result<()> {
            self.closed.set(self.closed.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn forwards_once() {
        let closed = Rc::new(Cell::new(0));
        let mut reader = Reader::from_reader(Tracked {
            data: b"\xEF\xBB\xBFabc",
            closed: closed.clone(),
        });

        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "abc");
        assert_eq!(closed.get(), 0);

        reader.close().unwrap();
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn through_buffered_reader() {
        let closed = Rc::new(Cell::new(0));
        let reader = Reader::from_reader(BufReader::new(Tracked {
            data: b"",
            closed: closed.clone(),
        }));

        reader.close().unwrap();
        assert_eq!(closed.get(), 1);
    }
}
