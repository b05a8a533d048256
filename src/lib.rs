//! Bit-plane list text
//!
//! Encodes arbitrary byte streams as a bracketed list of decimal integers
//! and back again.
//!
//! ## What is the format
//!
//! The input is cut into chunks of four bytes. Each chunk is turned into a
//! 32-bit word by a bit-plane transpose: bit `k` of byte `b` lands at bit
//! `k * 4 + b` of the word. The words are written as `[n, n, ...]`, with
//! exactly one comma and one space between numbers. A short final chunk is
//! zero padded, and decoding drops trailing zero bytes from every chunk.
//! The format has no header, versioning or compression; it is a reversible
//! shuffle, not a security primitive.
//!
//! ## Examples
//!
//! ### Encoding
//!
//! The encoder can process multiple input slices before finishing the list:
//!
//! ```
//! use scramble::{Encoder, Totals};
//!
//! let mut encoder = Encoder::new(Vec::new());
//!
//! let mut totals = encoder.encode(b"taco").unwrap();
//! assert_eq!(Totals::new(4, 10), totals);
//!
//! totals += encoder.encode(b"cat").unwrap();
//! assert_eq!(Totals::new(7, 10), totals);
//!
//! totals += encoder.finish().unwrap();
//! assert_eq!(Totals::new(7, 22), totals);
//! assert_eq!(b"[267487694, 125043731]", &encoder.into_inner()[..]);
//! ```
//!
//! ### Decoding
//!
//! Decoding reads from any buffered reader and fails closed on anything
//! that is not exactly one well-formed list:
//!
//! ```
//! use scramble::Error;
//!
//! let mut output = Vec::new();
//! let totals = scramble::decode(&b"[124807030]"[..], &mut output).unwrap();
//! assert_eq!(11, totals.read);
//! assert_eq!(b"foo", &output[..]);
//!
//! match scramble::decode(&b"[123,123]"[..], std::io::sink()) {
//!     Err(Error::ExpectedSpace { pos }) => assert_eq!(5, pos),
//!     other => panic!("unexpected result {:?}", other),
//! }
//! ```

#![deny(missing_docs)]

use std::io::{self, BufRead, Read, Write};
use std::ops::AddAssign;

mod decoder;
mod encoder;
mod error;
mod scanner;
pub mod word;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use scanner::{Literal, Scanner, Token, TokenKind};

/// Raw bytes per encoded word
pub const CHUNK_LEN: usize = 4;

/// Longest number literal accepted by the scanner
pub const MAX_TOKEN_LEN: usize = 20;

/// Byte counts of an encode or decode step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Input bytes consumed
    pub read: usize,
    /// Output bytes written
    pub written: usize,
}

impl Totals {
    /// Create totals from read and written byte counts
    pub fn new(read: usize, written: usize) -> Self {
        Totals { read, written }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.read += other.read;
        self.written += other.written;
    }
}

/// Encode everything from `reader` as one list document into `writer`.
pub fn encode<R: Read, W: Write>(mut reader: R, writer: W) -> Result<Totals> {
    let mut encoder = Encoder::new(writer);
    io::copy(&mut reader, &mut encoder).map_err(Error::from_io)?;
    encoder.finish()?;
    Ok(encoder.totals())
}

/// Decode one list document from `reader` into `writer`.
///
/// Input after the closing bracket is rejected without being scanned.
pub fn decode<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<Totals> {
    let mut scanner = Scanner::new(reader);
    let mut decoder = Decoder::new();
    let mut written = 0;

    while let Some(token) = scanner.next_token()? {
        written += decoder.push(token, &mut writer)?;
        if decoder.is_closed() && !scanner.is_exhausted()? {
            return Err(Error::TrailingCharacters {
                pos: scanner.offset(),
            });
        }
    }
    decoder.finish()?;

    Ok(Totals::new(scanner.offset(), written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    const VECTORS: &[(&str, &str)] = &[
        ("foo", "[124807030]"),
        (" foo", "[250662636]"),
        ("foot", "[267939702]"),
        ("BIRD", "[251930706]"),
        ("....", "[15794160]"),
        ("^^^^", "[252706800]"),
        ("Woot", "[266956663]"),
        ("no", "[53490482]"),
        ("tacocat", "[267487694, 125043731]"),
        (
            "never odd or even",
            "[267657050, 233917524, 234374596, 250875466, 17830160]",
        ),
        (
            "lager, sir, is regal",
            "[267394382, 167322264, 66212897, 200937635, 267422503]",
        ),
        (
            "go hang a salami, I'm a lasagna hog",
            "[200319795, 133178981, 234094669, 267441422, 78666124, 99619077, \
             267653454, 133178165, 124794470]",
        ),
        (
            "egad, a base tone denotes a bad age",
            "[267389735, 82841860, 267651166, 250793668, 233835785, 267665210, \
             99680277, 133170194, 124782119]",
        ),
    ];

    fn encode_bytes(input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        encode(input, &mut output)?;
        Ok(output)
    }

    fn decode_bytes(input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        decode(input, &mut output)?;
        Ok(output)
    }

    /// Writer that refuses every write.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn encode_vectors() {
        for (plain, text) in VECTORS {
            assert_eq!(text.as_bytes(), &encode_bytes(plain.as_bytes()).unwrap()[..]);
        }
    }

    #[test]
    fn decode_vectors() {
        for (plain, text) in VECTORS {
            assert_eq!(plain.as_bytes(), &decode_bytes(text.as_bytes()).unwrap()[..]);
        }
    }

    #[test]
    fn encode_empty_input() {
        match encode_bytes(b"") {
            Err(Error::EmptyInput) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn decode_rejects_malformed_lists() {
        match decode_bytes(b"[]") {
            Err(Error::EmptyList) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match decode_bytes(b"123]") {
            Err(Error::MissingOpenBracket { pos: 0 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match decode_bytes(b"[123,123]") {
            Err(Error::ExpectedSpace { pos: 5 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match decode_bytes(b"[123123123123123123123]") {
            Err(Error::TokenTooLong { pos: 1 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match decode_bytes(b"[123,,123]") {
            Err(Error::UnexpectedComma { pos: 5 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn totals_count_both_sides() {
        let mut output = Vec::new();
        assert_eq!(Totals::new(7, 22), encode(&b"tacocat"[..], &mut output).unwrap());
        assert_eq!(Totals::new(22, 7), decode(&output[..], io::sink()).unwrap());
    }

    #[test]
    fn short_inputs_round_trip() {
        for input in ["a", "ab", "abc", "abcd", "abcde"] {
            let text = encode_bytes(input.as_bytes()).unwrap();
            assert_eq!(input.as_bytes(), &decode_bytes(&text).unwrap()[..]);
        }
    }

    #[test]
    fn number_count_follows_length() {
        let numbers = |len: usize| {
            let text = encode_bytes(&vec![b'x'; len]).unwrap();
            text.iter().filter(|&&b| b == b',').count() + 1
        };
        assert_eq!(1, numbers(4));
        assert_eq!(2, numbers(5));
        assert_eq!(3, numbers(12));
        assert_eq!(4, numbers(13));
    }

    #[test]
    fn trailing_zero_bytes_are_lost() {
        let text = encode_bytes(b"ab\0\0cd\0").unwrap();
        assert_eq!(b"abcd", &decode_bytes(&text).unwrap()[..]);
    }

    #[test]
    fn trailing_content_is_not_scanned() {
        let mut input = b"[124807030]".to_vec();
        input.extend(std::iter::repeat(b'9').take(1_000_000));
        match decode_bytes(&input) {
            Err(Error::TrailingCharacters { pos: 11 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn hostile_literal_fails_fast() {
        let reader = io::BufReader::new(io::repeat(b'1'));
        match decode(io::Read::chain(&b"["[..], reader), io::sink()) {
            Err(Error::TokenTooLong { pos: 1 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn writer_errors_propagate() {
        match encode(&b"foo"[..], BrokenPipe) {
            Err(Error::Io(err)) => assert_eq!(io::ErrorKind::BrokenPipe, err.kind()),
            other => panic!("unexpected result {:?}", other),
        }
        match decode(&b"[124807030]"[..], BrokenPipe) {
            Err(Error::Io(err)) => assert_eq!(io::ErrorKind::BrokenPipe, err.kind()),
            other => panic!("unexpected result {:?}", other),
        }
    }

    quickcheck! {
        fn round_trip(input: Vec<u8>) -> TestResult {
            if input.is_empty() || input.contains(&0) {
                return TestResult::discard();
            }
            let text = match encode_bytes(&input) {
                Ok(text) => text,
                Err(_) => return TestResult::failed(),
            };
            TestResult::from_bool(decode_bytes(&text).ok() == Some(input))
        }
    }
}
