use std::io::Read;

use crate::error::{FlattenError, FlattenErrorKind};
use crate::token::{Token, TokenSource};

mod cursor;
mod number;
mod strings;

use cursor::Cursor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar allows at the current point in the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    /// A value is next. `closer_ok` permits `]` for a just-opened array.
    Value { closer_ok: bool },
    /// An object key is next. `closer_ok` permits `}` for a just-opened
    /// object; after a comma it is false, so trailing commas are
    /// rejected.
    Key { closer_ok: bool },
    /// A `,` or the enclosing container's closer is next.
    Sep,
    /// The root value is complete; only whitespace may remain.
    End,
}

/// Incremental strict-JSON tokenizer over a byte stream.
///
/// Pull-based: each `next_token` call consumes exactly one token plus any
/// punctuation around it. Commas and colons are validated and swallowed
/// here; they never reach the flattener. The tokenizer keeps its own
/// minimal container stack for that validation only; key and index
/// bookkeeping for paths lives in the flattener's frame stack.
pub struct Tokenizer<R> {
    cur: Cursor<R>,
    stack: Vec<Container>,
    expect: Expect,
    started: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(src: R) -> Self {
        Self::with_buffer(src, 64 * 1024)
    }

    pub fn with_buffer(src: R, capacity: usize) -> Self {
        Self {
            cur: Cursor::new(src, capacity),
            stack: Vec::new(),
            expect: Expect::Value { closer_ok: false },
            started: false,
        }
    }

    /// Absolute byte position of the next unread input byte.
    pub fn position(&self) -> usize {
        self.cur.position()
    }

    fn skip_ws(&mut self) -> Result<(), FlattenError> {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.cur.peek()? {
            self.cur.bump();
        }
        Ok(())
    }

    fn err_here(&self, kind: FlattenErrorKind) -> FlattenError {
        FlattenError::new(kind, self.cur.position())
    }

    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::End
        } else {
            Expect::Sep
        };
    }

    fn pop_container(&mut self, expected: Container) -> Token {
        let top = self.stack.pop();
        debug_assert_eq!(top, Some(expected));
        self.after_value();
        match expected {
            Container::Object => Token::ObjectClose,
            Container::Array => Token::ArrayClose,
        }
    }

    fn parse_scalar(&mut self, b: u8) -> Result<Token, FlattenError> {
        match b {
            b'"' => {
                self.cur.bump();
                Ok(Token::Str(strings::parse_string(&mut self.cur)?))
            }
            b'-' | b'0'..=b'9' => {
                self.cur.bump();
                Ok(Token::Num(number::parse_number(&mut self.cur, b)?))
            }
            b't' => {
                self.keyword("true")?;
                Ok(Token::Bool(true))
            }
            b'f' => {
                self.keyword("false")?;
                Ok(Token::Bool(false))
            }
            b'n' => {
                self.keyword("null")?;
                Ok(Token::Null)
            }
            _ => Err(self.err_here(FlattenErrorKind::UnexpectedChar(char::from(b)))),
        }
    }

    fn keyword(&mut self, word: &'static str) -> Result<(), FlattenError> {
        for &expected in word.as_bytes() {
            match self.cur.next()? {
                Some(b) if b == expected => {}
                Some(b) => {
                    return Err(FlattenError::new(
                        FlattenErrorKind::UnexpectedChar(char::from(b)),
                        self.cur.position() - 1,
                    ));
                }
                None => return Err(self.err_here(FlattenErrorKind::UnexpectedEnd)),
            }
        }
        // "nullable" is not "null" followed by a value
        if let Some(b) = self.cur.peek()? {
            if b.is_ascii_alphanumeric() {
                return Err(self.err_here(FlattenErrorKind::UnexpectedChar(char::from(b))));
            }
        }
        Ok(())
    }

    /// Parse a key string and its trailing colon, surfacing the key as a
    /// plain `Str` token.
    fn parse_key(&mut self) -> Result<Token, FlattenError> {
        self.cur.bump();
        let key = strings::parse_string(&mut self.cur)?;
        self.skip_ws()?;
        match self.cur.next()? {
            Some(b':') => {}
            Some(_) => {
                return Err(FlattenError::new(
                    FlattenErrorKind::ColonExpected,
                    self.cur.position() - 1,
                ));
            }
            None => return Err(self.err_here(FlattenErrorKind::UnexpectedEnd)),
        }
        self.expect = Expect::Value { closer_ok: false };
        Ok(Token::Str(key))
    }
}

impl<R: Read> TokenSource for Tokenizer<R> {
    fn next_token(&mut self) -> Result<Option<Token>, FlattenError> {
        loop {
            self.skip_ws()?;
            let b = match self.cur.peek()? {
                Some(b) => b,
                None => {
                    return match self.expect {
                        Expect::End => Ok(None),
                        // An empty (or whitespace-only) input is a valid
                        // empty document.
                        Expect::Value { .. } if !self.started => Ok(None),
                        _ => Err(self.err_here(FlattenErrorKind::UnexpectedEnd)),
                    };
                }
            };
            self.started = true;

            match self.expect {
                Expect::Value { closer_ok } => {
                    return match b {
                        b'{' => {
                            self.cur.bump();
                            self.stack.push(Container::Object);
                            self.expect = Expect::Key { closer_ok: true };
                            Ok(Some(Token::ObjectOpen))
                        }
                        b'[' => {
                            self.cur.bump();
                            self.stack.push(Container::Array);
                            self.expect = Expect::Value { closer_ok: true };
                            Ok(Some(Token::ArrayOpen))
                        }
                        b']' if closer_ok => {
                            self.cur.bump();
                            Ok(Some(self.pop_container(Container::Array)))
                        }
                        _ => {
                            let token = self.parse_scalar(b)?;
                            self.after_value();
                            Ok(Some(token))
                        }
                    };
                }
                Expect::Key { closer_ok } => {
                    return match b {
                        b'}' if closer_ok => {
                            self.cur.bump();
                            Ok(Some(self.pop_container(Container::Object)))
                        }
                        b'"' => Ok(Some(self.parse_key()?)),
                        _ => Err(self.err_here(FlattenErrorKind::KeyExpected)),
                    };
                }
                Expect::Sep => match (b, self.stack.last().copied()) {
                    (b',', Some(Container::Object)) => {
                        self.cur.bump();
                        self.expect = Expect::Key { closer_ok: false };
                    }
                    (b',', Some(Container::Array)) => {
                        self.cur.bump();
                        self.expect = Expect::Value { closer_ok: false };
                    }
                    (b'}', Some(Container::Object)) => {
                        self.cur.bump();
                        return Ok(Some(self.pop_container(Container::Object)));
                    }
                    (b']', Some(Container::Array)) => {
                        self.cur.bump();
                        return Ok(Some(self.pop_container(Container::Array)));
                    }
                    _ => {
                        return Err(
                            self.err_here(FlattenErrorKind::UnexpectedChar(char::from(b)))
                        );
                    }
                },
                Expect::End => return Err(self.err_here(FlattenErrorKind::TrailingData)),
            }
        }
    }
}
