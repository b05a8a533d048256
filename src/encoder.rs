use std::io::{self, Write};

use super::*;

/// Longest formatted piece: `", "`, ten digits and `"]"`.
const PIECE_LEN: usize = 16;

/// List-text encoder context
pub struct Encoder<W> {
    writer: W,
    /// Bytes waiting for a full chunk
    buffer: [u8; CHUNK_LEN],
    buffered: usize,
    /// No number has been written yet
    at_start: bool,
    /// Seen at least one input byte
    has_input: bool,
    finished: bool,
    /// A write to the sink failed
    poisoned: bool,
    /// Running totals across all calls
    totals: Totals,
}

impl<W: Write> Encoder<W> {
    /// Create a new context writing list text into `writer`
    pub fn new(writer: W) -> Self {
        Encoder {
            writer,
            buffer: [0; CHUNK_LEN],
            buffered: 0,
            at_start: true,
            has_input: false,
            finished: false,
            poisoned: false,
            totals: Totals::default(),
        }
    }

    /// Encode a slice of raw bytes.
    ///
    /// Every complete chunk is written out as a list element right away; a
    /// trailing partial chunk is held back until more input or [`finish`].
    ///
    /// Fails with [`Error::Finished`] once the list has been closed, and with
    /// [`Error::Poisoned`] after any earlier write error.
    ///
    /// [`finish`]: Encoder::finish
    pub fn encode(&mut self, input: &[u8]) -> Result<Totals> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        if self.finished {
            return Err(Error::Finished);
        }
        let mut totals = Totals::new(input.len(), 0);
        if input.is_empty() {
            return Ok(totals);
        }
        self.has_input = true;
        self.totals.read += input.len();

        let mut rest = input;
        if self.buffered > 0 {
            let take = (CHUNK_LEN - self.buffered).min(rest.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&rest[..take]);
            self.buffered += take;
            rest = &rest[take..];
            if self.buffered < CHUNK_LEN {
                return Ok(totals);
            }
            let chunk = self.buffer;
            totals.written += self.write_piece(&chunk, false)?;
            self.buffered = 0;
        }

        let mut chunks = rest.chunks_exact(CHUNK_LEN);
        for chunk in &mut chunks {
            totals.written += self.write_piece(chunk, false)?;
        }
        let tail = chunks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffered = tail.len();

        Ok(totals)
    }

    /// Finish the list, writing any pending partial chunk and the closing
    /// bracket.
    ///
    /// Fails with [`Error::EmptyInput`] when no bytes were ever encoded.
    /// Calling it again after a successful finish writes nothing; after a
    /// failed write it keeps failing with [`Error::Poisoned`].
    pub fn finish(&mut self) -> Result<Totals> {
        if !self.has_input {
            return Err(Error::EmptyInput);
        }
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        if self.finished {
            return Ok(Totals::default());
        }

        let written = if self.buffered > 0 {
            let chunk = self.buffer;
            let len = self.write_piece(&chunk[..self.buffered], true)?;
            self.buffered = 0;
            len
        } else {
            self.write_out(b"]")?;
            self.totals.written += 1;
            1
        };
        self.finished = true;

        Ok(Totals::new(0, written))
    }

    /// Bytes read and written since the encoder was created
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Consume the encoder, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Encode one chunk and write it with its surrounding punctuation
    fn write_piece(&mut self, chunk: &[u8], is_end: bool) -> Result<usize> {
        let n = word::encode(chunk)?;

        let mut piece = io::Cursor::new([0u8; PIECE_LEN]);
        match (self.at_start, is_end) {
            (true, true) => write!(piece, "[{}]", n)?,
            (true, false) => write!(piece, "[{}", n)?,
            (false, true) => write!(piece, ", {}]", n)?,
            (false, false) => write!(piece, ", {}", n)?,
        }
        let len = piece.position() as usize;
        self.write_out(&piece.get_ref()[..len])?;
        self.at_start = false;
        self.totals.written += len;

        Ok(len)
    }

    /// Write to the sink, poisoning the encoder on failure
    fn write_out(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|err| {
            self.poisoned = true;
            Error::Io(err)
        })
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.encode(buf)?.read)
    }

    /// Flushes the underlying writer; the list stays open.
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
