//! A reader that hands out already pulled bytes before delegating to the
//! underlying stream.

use std::cmp;
use std::fmt;
use std::io::{self, Read};

use crate::utils::Bytes;

/// Replays a prefix of bytes that were taken from `inner` earlier (while
/// sniffing the BOM), then continues with `inner` itself.
///
/// An error met while those bytes were taken can be parked here as well: it
/// is returned once the whole prefix was delivered, and only once.
pub(crate) struct Prefixed<R> {
    prefix: Vec<u8>,
    /// Number of bytes of `prefix` already delivered
    position: usize,
    /// Error to report after the prefix is exhausted
    deferred: Option<io::Error>,
    inner: R,
}

impl<R> Prefixed<R> {
    pub fn new(inner: R) -> Self {
        Self {
            prefix: Vec::new(),
            position: 0,
            deferred: None,
            inner,
        }
    }

    /// Puts bytes in front of everything not yet delivered.
    ///
    /// Called once, right after the BOM detection, while nothing is pending.
    pub fn unread(&mut self, bytes: &[u8], error: Option<io::Error>) {
        debug_assert!(self.pending().is_empty());
        debug_assert!(self.deferred.is_none());

        self.prefix.clear();
        self.prefix.extend_from_slice(bytes);
        self.position = 0;
        self.deferred = error;
    }

    /// Bytes waiting to be delivered before `inner` is read again.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.prefix[self.position..]
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Direct access to the underlying stream, bypassing pending bytes.
    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Prefixed<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position < self.prefix.len() {
            let pending = &self.prefix[self.position..];
            let amt = cmp::min(pending.len(), buf.len());
            buf[..amt].copy_from_slice(&pending[..amt]);
            self.position += amt;

            if self.position == self.prefix.len() {
                self.prefix.clear();
                self.position = 0;
            }
            // The caller has room for more, try to get it in the same call,
            // unless the stream is already known to be broken
            if amt == buf.len() || self.deferred.is_some() {
                return Ok(amt);
            }
            return match self.inner.read(&mut buf[amt..]) {
                Ok(n) => Ok(amt + n),
                Err(e) => {
                    self.deferred = Some(e);
                    Ok(amt)
                }
            };
        }
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        self.inner.read(buf)
    }
}

impl<R: fmt::Debug> fmt::Debug for Prefixed<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Prefixed")
            .field("pending", &Bytes(self.pending()))
            .field("deferred", &self.deferred)
            .field("inner", &self.inner)
            .finish()
    }
}
