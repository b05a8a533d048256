use std::io::Write;

use super::*;

/// Position in the list grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ExpectOpen,
    ExpectFirstNumber,
    AfterNumber,
    AfterComma,
    AfterSpace,
    Closed,
}

/// List-text decode context.
///
/// Tokens from a [`Scanner`] are pushed one at a time. The decoder checks
/// them against `'[' Number (', ' Number)* ']'` and writes the bytes of
/// every accepted number straight to the output.
pub struct Decoder {
    state: State,
    /// End offset of the last accepted token
    position: usize,
}

impl Decoder {
    /// Create a new context for list-text decoding
    pub fn new() -> Self {
        Decoder {
            state: State::ExpectOpen,
            position: 0,
        }
    }

    /// Whether the closing `]` has been accepted
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Feed the next token, writing any decoded bytes into `output`.
    ///
    /// Returns the number of bytes written.
    pub fn push<W: Write>(&mut self, token: Token, output: &mut W) -> Result<usize> {
        let pos = token.offset;
        let mut written = 0;

        self.state = match (self.state, token.kind) {
            (State::ExpectOpen, TokenKind::OpenBracket) => State::ExpectFirstNumber,
            (State::ExpectOpen, _) => return Err(Error::MissingOpenBracket { pos }),
            (State::Closed, _) => return Err(Error::TrailingCharacters { pos }),
            (_, TokenKind::OpenBracket) => return Err(Error::UnexpectedOpenBracket { pos }),

            (State::ExpectFirstNumber, TokenKind::CloseBracket) => return Err(Error::EmptyList),
            (State::AfterNumber, TokenKind::CloseBracket) => State::Closed,
            (_, TokenKind::CloseBracket) => return Err(Error::DanglingSeparator { pos }),

            (State::AfterNumber, TokenKind::Comma) => State::AfterComma,
            (_, TokenKind::Comma) => return Err(Error::UnexpectedComma { pos }),

            (State::AfterComma, TokenKind::Space) => State::AfterSpace,
            (_, TokenKind::Space) => return Err(Error::UnexpectedSpace { pos }),

            (State::AfterNumber, TokenKind::Number(_)) => {
                return Err(Error::ExpectedComma { pos })
            }
            (State::AfterComma, TokenKind::Number(_)) => {
                return Err(Error::ExpectedSpace { pos })
            }
            (_, TokenKind::Number(literal)) => {
                let n = literal.to_u32().ok_or(Error::InvalidNumber { pos })?;
                let chunk = word::decode(n);
                let bytes = word::trim_padding(&chunk);
                output.write_all(bytes)?;
                written = bytes.len();
                State::AfterNumber
            }
        };
        self.position = pos + token.len();

        Ok(written)
    }

    /// Check that the input formed one complete list.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            State::ExpectOpen => Err(Error::EmptyInput),
            State::Closed => Ok(()),
            _ => Err(Error::MissingCloseBracket { pos: self.position }),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}
