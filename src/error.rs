use std::io;

/// Type alias for handling codec errors.
pub type Result<T> = core::result::Result<T, self::Error>;

/// Errors encountered while encoding or decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    // Encoder errors
    /// A chunk handed to the word codec was longer than four bytes.
    #[error("chunk must be <= 4 bytes long, got {0}")]
    InvalidChunkLength(usize),
    /// The stream carried no bytes at all.
    #[error("empty input")]
    EmptyInput,
    /// The list was already closed by a successful finish.
    #[error("encoder already finished")]
    Finished,
    /// An earlier write failed, so the output is incomplete.
    #[error("encoder failed on an earlier write")]
    Poisoned,

    // Scanner errors
    /// A number literal ran past the maximum token length.
    #[error("token too long at pos {pos}")]
    TokenTooLong {
        /// Offset where the literal starts.
        pos: usize,
    },

    // Decoder errors
    /// The document does not start with `[`.
    #[error("expected [ at pos {pos}")]
    MissingOpenBracket {
        /// Offset of the offending token.
        pos: usize,
    },
    /// A `[` appeared after the list was opened.
    #[error("unexpected [ at pos {pos}")]
    UnexpectedOpenBracket {
        /// Offset of the offending token.
        pos: usize,
    },
    /// The list was closed without any number in it.
    #[error("empty list")]
    EmptyList,
    /// Input continues after the closing `]`.
    #[error("unexpected char after ] at pos {pos}")]
    TrailingCharacters {
        /// Offset of the first trailing byte.
        pos: usize,
    },
    /// The input ended before the list was closed.
    #[error("missing ] at pos {pos}")]
    MissingCloseBracket {
        /// Offset where the input ended.
        pos: usize,
    },
    /// A comma appeared somewhere other than right after a number.
    #[error("unexpected comma at pos {pos}")]
    UnexpectedComma {
        /// Offset of the offending token.
        pos: usize,
    },
    /// A space appeared somewhere other than right after a comma.
    #[error("unexpected space at pos {pos}")]
    UnexpectedSpace {
        /// Offset of the offending token.
        pos: usize,
    },
    /// A number followed the previous number without a separator.
    #[error("expected comma at pos {pos}")]
    ExpectedComma {
        /// Offset of the offending token.
        pos: usize,
    },
    /// A number followed a comma without the space in between.
    #[error("expected space at pos {pos}")]
    ExpectedSpace {
        /// Offset of the offending token.
        pos: usize,
    },
    /// The list was closed right after a separator.
    #[error("unexpected ] after separator at pos {pos}")]
    DanglingSeparator {
        /// Offset of the closing bracket.
        pos: usize,
    },
    /// A literal is not a decimal number in the 32-bit range.
    #[error("failed to parse number at pos {pos}")]
    InvalidNumber {
        /// Offset where the literal starts.
        pos: usize,
    },

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Unwrap a codec error that was carried through an [`io::Error`]
    pub(crate) fn from_io(err: io::Error) -> Self {
        if !err.get_ref().map_or(false, |inner| inner.is::<Error>()) {
            return Error::Io(err);
        }
        let kind = err.kind();
        match err.into_inner() {
            Some(inner) => match inner.downcast::<Error>() {
                Ok(err) => *err,
                Err(inner) => Error::Io(io::Error::new(kind, inner)),
            },
            None => Error::Io(kind.into()),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_survives_round_trip() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        let io_err = io::Error::from(err);
        assert_eq!(io::ErrorKind::BrokenPipe, io_err.kind());
        assert_eq!("closed", io_err.to_string());
    }

    #[test]
    fn codec_error_becomes_invalid_data() {
        let io_err = io::Error::from(Error::EmptyList);
        assert_eq!(io::ErrorKind::InvalidData, io_err.kind());
        assert_eq!("empty list", io_err.to_string());
    }

    #[test]
    fn codec_error_recovered_from_io() {
        let io_err = io::Error::from(Error::InvalidChunkLength(5));
        match Error::from_io(io_err) {
            Error::InvalidChunkLength(5) => {}
            other => panic!("unexpected error {:?}", other),
        }
        match Error::from_io(io::ErrorKind::UnexpectedEof.into()) {
            Error::Io(err) => assert_eq!(io::ErrorKind::UnexpectedEof, err.kind()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn messages_carry_offsets() {
        assert_eq!("expected [ at pos 0", Error::MissingOpenBracket { pos: 0 }.to_string());
        assert_eq!("expected space at pos 5", Error::ExpectedSpace { pos: 5 }.to_string());
        assert_eq!("token too long at pos 1", Error::TokenTooLong { pos: 1 }.to_string());
    }
}
