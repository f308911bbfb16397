//! Byte order marks and the encodings they announce.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// Unicode "byte order mark" encoded as UTF-8
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
/// Unicode "byte order mark" encoded as UTF-16 with little-endian byte order
pub const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
/// Unicode "byte order mark" encoded as UTF-16 with big-endian byte order
pub const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Longest BOM recognized by [`Bom::detect`]. The detector never looks
/// further than that.
pub const MAX_BOM_LEN: usize = 3;

/// Outcome of the BOM detection performed on the first bytes of a stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Bom {
    /// No BOM was found. The stream is assumed to be UTF-8 and is passed
    /// through unchanged.
    Absent,
    /// `EF BB BF`. The BOM is stripped, the rest is passed through.
    Utf8,
    /// `FF FE`. The BOM is stripped, the rest is transcoded to UTF-8.
    Utf16Le,
    /// `FE FF`. The BOM is stripped, the rest is transcoded to UTF-8.
    Utf16Be,
}

impl Bom {
    /// Classifies the first bytes of a stream.
    ///
    /// Only the bytes actually given are examined, so a BOM that is cut
    /// short is not recognized:
    ///
    /// | Bytes        | Detected
    /// |--------------|--------------------
    /// |`EF BB BF ..` | [`Bom::Utf8`]
    /// |`FF FE ..`    | [`Bom::Utf16Le`]
    /// |`FE FF ..`    | [`Bom::Utf16Be`]
    /// | anything else| [`Bom::Absent`]
    ///
    /// ```
    /// use utffile::Bom;
    ///
    /// assert_eq!(Bom::detect(b"\xEF\xBB\xBFabc"), Bom::Utf8);
    /// assert_eq!(Bom::detect(b"\xEF\xBB"), Bom::Absent);
    /// assert_eq!(Bom::detect(b"\xFE\xFF"), Bom::Utf16Be);
    /// ```
    pub fn detect(bytes: &[u8]) -> Bom {
        match bytes {
            _ if bytes.starts_with(UTF8_BOM) => Bom::Utf8,
            _ if bytes.starts_with(UTF16_LE_BOM) => Bom::Utf16Le,
            _ if bytes.starts_with(UTF16_BE_BOM) => Bom::Utf16Be,
            _ => Bom::Absent,
        }
    }

    /// Returns the bytes of this BOM, empty for [`Bom::Absent`].
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Bom::Absent => &[],
            Bom::Utf8 => UTF8_BOM,
            Bom::Utf16Le => UTF16_LE_BOM,
            Bom::Utf16Be => UTF16_BE_BOM,
        }
    }

    /// Number of leading bytes discarded from the stream.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Encoding of the stream content. [`Bom::Absent`] means UTF-8.
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Bom::Absent | Bom::Utf8 => UTF_8,
            Bom::Utf16Le => UTF_16LE,
            Bom::Utf16Be => UTF_16BE,
        }
    }

    /// Whether the content after the BOM has to go through the transcoder.
    #[inline]
    pub fn needs_transcoding(&self) -> bool {
        matches!(self, Bom::Utf16Le | Bom::Utf16Be)
    }
}
