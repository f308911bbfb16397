//! Contains the BOM sniffing [`Reader`] and its [`Config`].

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::Encoding;

use crate::close::Close;
use crate::encoding::{Bom, MAX_BOM_LEN};
use crate::errors::Result;

mod prefixed;
mod transcode;

use prefixed::Prefixed;
use transcode::Transcoder;

/// A struct that holds a reader configuration.
///
/// Configuration is consulted when the first bytes are read. Changing it
/// later has no effect on a reader that has already detected its encoding.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub struct Config {
    /// Whether the first bytes should be checked for a BOM.
    ///
    /// When set to `false`, the stream is passed through as-is, BOM included.
    ///
    /// Default: `true`
    pub sniff_bom: bool,

    /// Whether malformed UTF-16 (unpaired surrogates, odd number of bytes)
    /// should be replaced with the U+FFFD REPLACEMENT CHARACTER.
    ///
    /// When set to `false`, a malformed sequence is reported as
    /// [`Error::NonDecodable`] wrapped into an [`io::Error`] of kind
    /// [`InvalidData`]. Text decoded before it is delivered first, and
    /// decoding can be resumed after the error.
    ///
    /// Default: `false`
    ///
    /// [`Error::NonDecodable`]: crate::errors::Error::NonDecodable
    /// [`InvalidData`]: io::ErrorKind::InvalidData
    pub replace_malformed: bool,

    /// Size of the internal buffer for raw UTF-16 input. Values below 4 are
    /// rounded up. Unused for UTF-8 streams.
    ///
    /// Default: 8 KiB
    pub buffer_size: usize,
}

impl Config {
    /// Set [`Self::sniff_bom`] to the given value.
    #[inline]
    pub fn sniff_bom(&mut self, value: bool) -> &mut Self {
        self.sniff_bom = value;
        self
    }

    /// Set [`Self::replace_malformed`] to the given value.
    #[inline]
    pub fn replace_malformed(&mut self, value: bool) -> &mut Self {
        self.replace_malformed = value;
        self
    }

    /// Set [`Self::buffer_size`] to the given value.
    #[inline]
    pub fn buffer_size(&mut self, value: usize) -> &mut Self {
        self.buffer_size = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sniff_bom: true,
            replace_malformed: false,
            buffer_size: 8 * 1024,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A reader that strips a leading byte order mark and converts UTF-16 input
/// to UTF-8.
///
/// The first call to [`read`] looks at (at most) 3 bytes of the underlying
/// stream and decides, once and for all, how the stream is encoded:
///
/// - UTF-8 BOM: the BOM is removed, everything else passed through;
/// - UTF-16 BOM (either byte order): the BOM is removed, the rest is
///   transcoded to UTF-8;
/// - no BOM: the stream is passed through unchanged.
///
/// Reads of any size are supported, down to one byte at a time.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use utffile::Reader;
///
/// // "hé" encoded as UTF-16BE with a BOM
/// let source: &[u8] = b"\xFE\xFF\x00h\x00\xE9";
/// let mut reader = Reader::from_reader(source);
///
/// let mut text = String::new();
/// reader.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "hé");
/// ```
///
/// If the underlying stream can be closed, so can the reader:
///
/// ```no_run
/// use utffile::{Close, Reader};
///
/// let reader = Reader::from_file("notes.txt")?;
/// reader.close()?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// [`read`]: Read::read
pub struct Reader<R> {
    /// Underlying stream, with probe bytes still to deliver in front of it
    source: Prefixed<R>,
    /// Outcome of the detection, `None` until the first read
    bom: Option<Bom>,
    /// Present if the stream must be transcoded
    transcoder: Option<Transcoder>,
    config: Config,
}

/// Builder methods
impl<R> Reader<R> {
    /// Creates a `Reader` that reads from a given reader.
    pub fn from_reader(reader: R) -> Self {
        Self::with_config(reader, Config::default())
    }

    /// Creates a `Reader` with a custom configuration.
    pub fn with_config(reader: R, config: Config) -> Self {
        Self {
            source: Prefixed::new(reader),
            bom: None,
            transcoder: None,
            config,
        }
    }

    /// Returns reference to the reader configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns mutable reference to the reader configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Getters
impl<R> Reader<R> {
    /// Returns the detection outcome, or `None` if nothing was read yet.
    pub fn bom(&self) -> Option<Bom> {
        self.bom
    }

    /// Returns the encoding of the underlying stream, or `None` if nothing
    /// was read yet. Output of the reader is always UTF-8.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match &self.transcoder {
            Some(transcoder) => Some(transcoder.encoding()),
            None => self.bom.map(|bom| bom.encoding()),
        }
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Consumes `Reader` returning the underlying reader.
    ///
    /// Bytes already taken from the underlying reader but not yet delivered
    /// are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl Reader<File> {
    /// Opens a file and creates a `Reader` over it.
    ///
    /// Errors of opening the file are returned in [`Error::Io`] unchanged.
    ///
    /// [`Error::Io`]: crate::errors::Error::Io
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

/// Private methods
impl<R: Read> Reader<R> {
    /// Takes up to 3 bytes from the underlying stream, decides the encoding
    /// and arranges for the bytes that are not part of the BOM to be
    /// delivered or transcoded.
    fn sniff(&mut self) -> Bom {
        if !self.config.sniff_bom {
            log::debug!("BOM sniffing disabled, passing stream through");
            return Bom::Absent;
        }

        let mut probe = [0u8; MAX_BOM_LEN];
        let mut len = 0;
        let mut error = None;
        let inner = self.source.get_mut();
        while len < probe.len() {
            match inner.read(&mut probe[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }
        let probe = &probe[..len];

        if let Some(e) = error {
            log::debug!(
                "error after probing {} byte(s), assuming no BOM: {}",
                len,
                e
            );
            self.source.unread(probe, Some(e));
            return Bom::Absent;
        }

        let bom = Bom::detect(probe);
        log::debug!("detected {:?} from {} probed byte(s)", bom, len);
        let rest = &probe[bom.len()..];
        if bom.needs_transcoding() {
            self.transcoder = Some(Transcoder::new(
                bom.encoding(),
                bom.len() as u64,
                self.config.buffer_size,
                self.config.replace_malformed,
            ));
        }
        self.source.unread(rest, None);
        bom
    }
}

impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bom.is_none() {
            self.bom = Some(self.sniff());
        }
        let read = match &mut self.transcoder {
            Some(transcoder) => transcoder.read_from(&mut self.source, buf),
            None => self.source.read(buf),
        };
        if let Ok(n) = read {
            log::trace!("read {} of {} requested byte(s)", n, buf.len());
        }
        read
    }
}

impl<R: Close> Close for Reader<R> {
    /// Closes the underlying stream. Bytes not yet read are lost.
    fn close(self) -> io::Result<()> {
        self.into_inner().close()
    }
}

impl<R: fmt::Debug> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("source", &self.source)
            .field("bom", &self.bom)
            // `encoding_rs::Decoder` does not implement `Debug`
            .field(
                "transcoder",
                &self.transcoder.as_ref().map(|t| t.encoding().name()),
            )
            .field("config", &self.config)
            .finish()
    }
}
