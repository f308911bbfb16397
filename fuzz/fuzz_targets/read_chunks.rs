#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use std::io::Read;
use utffile::{Bom, Config, Reader};

#[derive(Arbitrary, Debug)]
struct Input {
    /// Caller buffer size, 0 is read as 1
    chunk: u8,
    /// Underlying source hands out at most that many bytes per call, 0 means no limit
    trickle: u8,
    data: Vec<u8>,
}

struct Trickle<'a> {
    data: &'a [u8],
    limit: usize,
}

impl<'a> Read for Trickle<'a> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = if self.limit == 0 { buf.len() } else { buf.len().min(self.limit) };
        self.data.read(&mut buf[..len])
    }
}

fuzz_target!(|input: Input| {
    let mut config = Config::default();
    config.replace_malformed(true);
    let source = Trickle {
        data: &input.data,
        limit: input.trickle as usize,
    };
    let mut reader = Reader::with_config(source, config);

    let mut buf = vec![0; (input.chunk as usize).max(1)];
    let mut out = Vec::new();
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    // Output must match decoding the whole input at once
    let bom = Bom::detect(&input.data);
    assert_eq!(reader.bom(), Some(bom));
    let rest = &input.data[bom.len()..];
    if bom.needs_transcoding() {
        let (expected, _) = bom.encoding().decode_without_bom_handling(rest);
        assert_eq!(out, expected.as_bytes());
    } else {
        assert_eq!(out, rest);
    }
});
