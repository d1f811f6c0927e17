use std::io::Read;

use crate::error::FlattenError;

/// Buffered byte cursor over an `io::Read`, tracking the absolute offset
/// of every byte handed out so errors can point into the input.
pub(crate) struct Cursor<R> {
    src: R,
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
    offset: usize,
    eof: bool,
}

impl<R: Read> Cursor<R> {
    pub(crate) fn new(src: R, capacity: usize) -> Self {
        Self {
            src,
            buf: vec![0u8; capacity.max(16)],
            pos: 0,
            filled: 0,
            offset: 0,
            eof: false,
        }
    }

    /// Absolute position of the next unread byte.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.offset + self.pos
    }

    fn fill(&mut self) -> Result<(), FlattenError> {
        if self.pos < self.filled || self.eof {
            return Ok(());
        }
        self.offset += self.filled;
        self.pos = 0;
        self.filled = 0;
        loop {
            match self.src.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.filled = n;
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FlattenError::io(e, self.position())),
            }
        }
    }

    /// Next byte without consuming it; `None` at end of input.
    #[inline]
    pub(crate) fn peek(&mut self) -> Result<Option<u8>, FlattenError> {
        self.fill()?;
        if self.pos < self.filled {
            Ok(Some(self.buf[self.pos]))
        } else {
            Ok(None)
        }
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(self.pos < self.filled);
        self.pos += 1;
    }

    pub(crate) fn next(&mut self) -> Result<Option<u8>, FlattenError> {
        let b = self.peek()?;
        if b.is_some() {
            self.bump();
        }
        Ok(b)
    }

    /// Unread tail of the current buffer window. Only meaningful right
    /// after a successful `peek`; an empty window does not mean end of
    /// input.
    #[inline]
    pub(crate) fn window(&self) -> &[u8] {
        &self.buf[self.pos..self.filled]
    }

    /// Consume `n` bytes known to sit inside the current window.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.filled);
        self.pos += n;
    }
}
