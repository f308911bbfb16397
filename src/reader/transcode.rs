//! Streaming UTF-16 to UTF-8 transcoding.

use std::cmp;
use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, DecoderResult, Encoding};

use crate::errors::Error;

/// Smallest output buffer that always has room for one UTF-8 encoded scalar
/// value, the U+FFFD replacement character included.
const MIN_OUTPUT: usize = 4;

/// State of a transcoding stage.
///
/// The transcoder does not own its source, it pulls raw bytes from whatever
/// reader is passed to [`Transcoder::read_from`]. The same source must be
/// passed on every call.
pub(crate) struct Transcoder {
    decoder: Decoder,
    replace_malformed: bool,
    /// Raw bytes read from the source
    buf: Vec<u8>,
    /// Start of not yet decoded bytes in `buf`
    pos: usize,
    /// End of valid bytes in `buf`
    len: usize,
    /// Offset in the underlying stream of `buf[pos]`
    offset: u64,
    /// Output of one scalar value for callers with tiny buffers
    tiny: [u8; MIN_OUTPUT],
    tiny_pos: usize,
    tiny_len: usize,
    /// Source reported end of stream
    eof: bool,
    /// Decoder was flushed, nothing more will be produced
    finished: bool,
    /// Decode error to report on the next call, after bytes that precede it
    /// have been delivered
    error: Option<Error>,
}

impl Transcoder {
    /// Creates a transcoder for `encoding`. `offset` is the number of stream
    /// bytes preceding the first byte this transcoder will see, used in error
    /// positions.
    pub fn new(
        encoding: &'static Encoding,
        offset: u64,
        buffer_size: usize,
        replace_malformed: bool,
    ) -> Self {
        Self {
            decoder: encoding.new_decoder_without_bom_handling(),
            replace_malformed,
            buf: vec![0; cmp::max(buffer_size, MIN_OUTPUT)],
            pos: 0,
            len: 0,
            offset,
            tiny: [0; MIN_OUTPUT],
            tiny_pos: 0,
            tiny_len: 0,
            eof: false,
            finished: false,
            error: None,
        }
    }

    #[inline]
    pub fn encoding(&self) -> &'static Encoding {
        self.decoder.encoding()
    }

    /// Fills `dst` with UTF-8 produced from bytes of `src`.
    ///
    /// Returns `Ok(0)` only if `dst` is empty or the source is exhausted and
    /// everything was delivered.
    pub fn read_from<R: Read>(&mut self, src: &mut R, dst: &mut [u8]) -> io::Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        if self.tiny_pos < self.tiny_len {
            return Ok(self.drain_tiny(dst));
        }
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        while !self.finished {
            if self.pos == self.len && !self.eof {
                self.fill(src)?;
            }
            let last = self.eof;
            let input = &self.buf[self.pos..self.len];
            let use_tiny = dst.len() < MIN_OUTPUT;
            let output = if use_tiny { &mut self.tiny[..] } else { &mut *dst };

            let (result, read, written) =
                decode(&mut self.decoder, self.replace_malformed, input, output, last);
            self.pos += read;
            self.offset += read as u64;

            match result {
                DecoderResult::Malformed(bad, consumed) => {
                    let error = Error::NonDecodable {
                        encoding: self.decoder.encoding(),
                        position: self.offset - bad as u64 - consumed as u64,
                    };
                    if written == 0 {
                        return Err(error.into());
                    }
                    self.error = Some(error);
                }
                DecoderResult::InputEmpty if last => self.finished = true,
                _ => {}
            }
            if written > 0 {
                if use_tiny {
                    self.tiny_pos = 0;
                    self.tiny_len = written;
                    return Ok(self.drain_tiny(dst));
                }
                return Ok(written);
            }
        }
        Ok(0)
    }

    fn drain_tiny(&mut self, dst: &mut [u8]) -> usize {
        let amt = cmp::min(self.tiny_len - self.tiny_pos, dst.len());
        dst[..amt].copy_from_slice(&self.tiny[self.tiny_pos..self.tiny_pos + amt]);
        self.tiny_pos += amt;
        amt
    }

    /// Refills the raw buffer. Must be called only when every byte in it
    /// was given to the decoder.
    fn fill<R: Read>(&mut self, src: &mut R) -> io::Result<()> {
        debug_assert_eq!(self.pos, self.len);
        loop {
            break match src.read(&mut self.buf) {
                Ok(0) => {
                    log::trace!("transcoder reached end of stream at {}", self.offset);
                    self.pos = 0;
                    self.len = 0;
                    self.eof = true;
                    Ok(())
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    Ok(())
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => Err(e),
            };
        }
    }
}

/// Runs the decoder with the requested malformed sequence policy, reporting
/// progress in the terms of the strict decoder.
fn decode(
    decoder: &mut Decoder,
    replace_malformed: bool,
    src: &[u8],
    dst: &mut [u8],
    last: bool,
) -> (DecoderResult, usize, usize) {
    if replace_malformed {
        let (result, read, written, _) = decoder.decode_to_utf8(src, dst, last);
        let result = match result {
            CoderResult::InputEmpty => DecoderResult::InputEmpty,
            CoderResult::OutputFull => DecoderResult::OutputFull,
        };
        (result, read, written)
    } else {
        decoder.decode_to_utf8_without_replacement(src, dst, last)
    }
}
