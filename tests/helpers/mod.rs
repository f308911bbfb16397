//! Utility functions and test sources for integration tests

#![allow(dead_code)]

use std::io::{self, Read};

/// Text stored in every non-trivial document of `tests/documents`
pub const TEXT: &str = "Hello, viele Grüße & さよなら!";

/// Encodes `text` as UTF-16LE, prefixed with a BOM
pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Encodes `text` as UTF-16BE, prefixed with a BOM
pub fn utf16be_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Encodes `text` as UTF-8, prefixed with a BOM
pub fn utf8_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Reads `reader` to the end using a buffer of `chunk` bytes for each call
pub fn read_in_chunks<R: Read>(mut reader: R, chunk: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0; chunk];
    let mut out = Vec::new();
    loop {
        match reader.read(&mut buf)? {
            0 => return Ok(out),
            n => out.extend_from_slice(&buf[..n]),
        }
    }
}

/// A source that never returns more than one byte per call
pub struct OneByte<'a>(pub &'a [u8]);

impl<'a> Read for OneByte<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.0.read(&mut buf[..len])
    }
}

/// A source that returns `data`, then fails with [`io::ErrorKind::ConnectionReset`]
/// once, then reports end of stream
pub struct FailAfter<'a> {
    pub data: &'a [u8],
    pub failed: bool,
}

impl<'a> FailAfter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            failed: false,
        }
    }
}

impl<'a> Read for FailAfter<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() && !self.failed && !buf.is_empty() {
            self.failed = true;
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source failed"));
        }
        self.data.read(buf)
    }
}

/// A source that interrupts every other call
pub struct Interrupting<'a> {
    pub data: &'a [u8],
    pub interrupt: bool,
}

impl<'a> Read for Interrupting<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.data.read(buf)
    }
}
