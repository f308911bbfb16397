//! Reading files of `tests/documents` through `open`.

use std::io::{self, Read};

use pretty_assertions::assert_eq;
use utffile::{Bom, Close, Error};

mod helpers;
use helpers::{read_in_chunks, OneByte, TEXT};

macro_rules! documents {
    ($($name:ident($path:literal) => $bom:expr, $expected:expr;)*) => {
        $(
            mod $name {
                use super::*;
                use pretty_assertions::assert_eq;

                /// Reads the whole file at once
                #[test]
                fn whole() {
                    let mut reader = utffile::open(concat!("tests/documents/", $path)).unwrap();
                    let mut contents = String::new();
                    reader.read_to_string(&mut contents).unwrap();

                    assert_eq!(contents, $expected);
                    assert_eq!(reader.bom(), Some($bom));
                    reader.close().unwrap();
                }

                /// Reads the file one byte at a time
                #[test]
                fn slow() {
                    let reader = utffile::open(concat!("tests/documents/", $path)).unwrap();
                    let contents = read_in_chunks(reader, 1).unwrap();

                    assert_eq!(String::from_utf8(contents).unwrap(), $expected);
                }

                /// Underlying source gives one byte per call
                #[test]
                fn trickle() {
                    let source = include_bytes!(concat!("documents/", $path));
                    let reader = utffile::wrap(OneByte(source));
                    let contents = read_in_chunks(reader, 64).unwrap();

                    assert_eq!(String::from_utf8(contents).unwrap(), $expected);
                }
            }
        )*
    };
}

documents! {
    empty("empty.txt") => Bom::Absent, "";
    short1("1byte.txt") => Bom::Absent, "a";
    short2("2byte.txt") => Bom::Absent, "ab";
    short3("3byte.txt") => Bom::Absent, "abc";
    short4("4byte.txt") => Bom::Absent, "abcd";
    utf8("utf8.txt") => Bom::Absent, TEXT;
    utf8_bom("utf8-bom.txt") => Bom::Utf8, TEXT;
    utf16le("utf16-le.txt") => Bom::Utf16Le, TEXT;
    utf16be("utf16-be.txt") => Bom::Utf16Be, TEXT;
    empty_utf8_bom("empty-utf8-bom.txt") => Bom::Utf8, "";
    empty_utf16le("empty-utf16-le.txt") => Bom::Utf16Le, "";
    empty_utf16be("empty-utf16-be.txt") => Bom::Utf16Be, "";
}

#[test]
fn not_found() {
    match utffile::open("tests/documents/does-not-exist.txt") {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
        Err(e) => panic!("expected `Io` error, but got {:?}", e),
        Ok(r) => panic!("expected error, but got {:?}", r),
    }
}

#[test]
fn close_before_reading() {
    let reader = utffile::open("tests/documents/utf16-le.txt").unwrap();
    reader.close().unwrap();
}

#[test]
fn close_after_partial_read() {
    let mut reader = utffile::open("tests/documents/utf16-be.txt").unwrap();
    let mut buf = [0; 5];
    assert_eq!(reader.read(&mut buf).unwrap(), 5);
    assert_eq!(&buf, b"Hello");
    reader.close().unwrap();
}

#[test]
fn wrap_opened_file() {
    let file = std::fs::File::open("tests/documents/utf8-bom.txt").unwrap();
    let mut reader = utffile::wrap(io::BufReader::new(file));
    let mut contents = String::new();
    reader.read_to_string(&mut contents).unwrap();

    assert_eq!(contents, TEXT);
    reader.close().unwrap();
}
