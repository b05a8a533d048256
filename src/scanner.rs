use std::fmt;
use std::io::{self, BufRead};

use super::*;

/// Number literal bytes, held inline.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    bytes: [u8; MAX_TOKEN_LEN],
    len: usize,
}

impl Literal {
    fn new() -> Self {
        Literal {
            bytes: [0; MAX_TOKEN_LEN],
            len: 0,
        }
    }

    /// Append a byte, returning `false` if the literal is already full
    fn push(&mut self, byte: u8) -> bool {
        if self.len == MAX_TOKEN_LEN {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    /// The raw literal text
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Parse the literal as a base-10 `u32`.
    ///
    /// Only ASCII digits are accepted; signs and whitespace are not.
    pub fn to_u32(&self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        self.as_bytes().iter().try_fold(0u32, |acc, &b| {
            if !b.is_ascii_digit() {
                return None;
            }
            acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
        })
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// ` `
    Space,
    /// A run of anything else, meant to be decimal digits
    Number(Literal),
}

impl TokenKind {
    fn separator(byte: u8) -> Option<Self> {
        match byte {
            b'[' => Some(TokenKind::OpenBracket),
            b']' => Some(TokenKind::CloseBracket),
            b',' => Some(TokenKind::Comma),
            b' ' => Some(TokenKind::Space),
            _ => None,
        }
    }
}

/// A token and the input offset it starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Offset of the first byte of the token
    pub offset: usize,
    /// What was scanned
    pub kind: TokenKind,
}

impl Token {
    /// Number of input bytes the token covers
    pub(crate) fn len(&self) -> usize {
        match self.kind {
            TokenKind::Number(literal) => literal.len,
            _ => 1,
        }
    }
}

/// Splits list text into tokens without buffering more than one literal.
pub struct Scanner<R> {
    reader: R,
    offset: usize,
}

impl<R: BufRead> Scanner<R> {
    /// Create a scanner over `reader`
    pub fn new(reader: R) -> Self {
        Scanner { reader, offset: 0 }
    }

    /// Number of input bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scan the next token, or `None` once the input is exhausted.
    ///
    /// A literal longer than [`MAX_TOKEN_LEN`] fails with
    /// [`Error::TokenTooLong`] as soon as the excess byte is seen.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let start = self.offset;
        let mut literal = Literal::new();

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut found = None;
            for &byte in buf {
                if let Some(kind) = TokenKind::separator(byte) {
                    if literal.len == 0 {
                        used += 1;
                        found = Some(kind);
                    } else {
                        found = Some(TokenKind::Number(literal));
                    }
                    break;
                }
                if !literal.push(byte) {
                    return Err(Error::TokenTooLong { pos: start });
                }
                used += 1;
            }
            self.reader.consume(used);
            self.offset += used;

            if let Some(kind) = found {
                return Ok(Some(Token {
                    offset: start,
                    kind,
                }));
            }
        }

        if literal.len == 0 {
            return Ok(None);
        }
        Ok(Some(Token {
            offset: start,
            kind: TokenKind::Number(literal),
        }))
    }

    /// Whether the input has no bytes left
    pub fn is_exhausted(&mut self) -> Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
