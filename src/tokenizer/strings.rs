use std::io::Read;

use memchr::memchr2;

use super::cursor::Cursor;
use crate::error::{FlattenError, FlattenErrorKind};

/// Parse a string literal whose opening quote has already been consumed,
/// resolving all escapes. Plain runs are located with memchr and copied
/// in bulk; the per-byte path only runs on escapes and buffer refills.
pub(crate) fn parse_string<R: Read>(cur: &mut Cursor<R>) -> Result<String, FlattenError> {
    let mut out: Vec<u8> = Vec::new();
    loop {
        if cur.peek()?.is_none() {
            return Err(FlattenError::new(
                FlattenErrorKind::UnexpectedEnd,
                cur.position(),
            ));
        }
        let window = cur.window();
        match memchr2(b'"', b'\\', window) {
            Some(idx) => {
                let run = &window[..idx];
                check_controls(run, cur.position())?;
                out.extend_from_slice(run);
                let stop = window[idx];
                cur.consume(idx + 1);
                if stop == b'"' {
                    return String::from_utf8(out).map_err(|_| {
                        FlattenError::new(FlattenErrorKind::InvalidUtf8, cur.position())
                    });
                }
                parse_escape(cur, &mut out)?;
            }
            None => {
                check_controls(window, cur.position())?;
                out.extend_from_slice(window);
                let n = window.len();
                cur.consume(n);
            }
        }
    }
}

fn check_controls(run: &[u8], base: usize) -> Result<(), FlattenError> {
    if let Some(i) = run.iter().position(|&b| b < 0x20) {
        return Err(FlattenError::new(
            FlattenErrorKind::BareControlChar,
            base + i,
        ));
    }
    Ok(())
}

/// Decode one escape sequence; the backslash has already been consumed.
fn parse_escape<R: Read>(cur: &mut Cursor<R>, out: &mut Vec<u8>) -> Result<(), FlattenError> {
    let pos = cur.position();
    let b = match cur.next()? {
        Some(b) => b,
        None => {
            return Err(FlattenError::new(
                FlattenErrorKind::UnexpectedEnd,
                cur.position(),
            ));
        }
    };
    match b {
        b'"' => out.push(b'"'),
        b'\\' => out.push(b'\\'),
        b'/' => out.push(b'/'),
        b'b' => out.push(0x08),
        b'f' => out.push(0x0C),
        b'n' => out.push(b'\n'),
        b'r' => out.push(b'\r'),
        b't' => out.push(b'\t'),
        b'u' => {
            let hi = read_hex4(cur)?;
            let code = if (0xD800..0xDC00).contains(&hi) {
                // High surrogate: a \uXXXX low surrogate must follow.
                expect_byte(cur, b'\\')?;
                expect_byte(cur, b'u')?;
                let lo = read_hex4(cur)?;
                if !(0xDC00..0xE000).contains(&lo) {
                    return Err(FlattenError::new(FlattenErrorKind::InvalidEscape, pos));
                }
                0x10000 + ((u32::from(hi) - 0xD800) << 10) + (u32::from(lo) - 0xDC00)
            } else if (0xDC00..0xE000).contains(&hi) {
                return Err(FlattenError::new(FlattenErrorKind::InvalidEscape, pos));
            } else {
                u32::from(hi)
            };
            let ch = char::from_u32(code)
                .ok_or_else(|| FlattenError::new(FlattenErrorKind::InvalidEscape, pos))?;
            let mut tmp = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
        }
        _ => return Err(FlattenError::new(FlattenErrorKind::InvalidEscape, pos)),
    }
    Ok(())
}

fn expect_byte<R: Read>(cur: &mut Cursor<R>, expected: u8) -> Result<(), FlattenError> {
    match cur.next()? {
        Some(b) if b == expected => Ok(()),
        Some(_) => Err(FlattenError::new(
            FlattenErrorKind::InvalidEscape,
            cur.position() - 1,
        )),
        None => Err(FlattenError::new(
            FlattenErrorKind::UnexpectedEnd,
            cur.position(),
        )),
    }
}

fn read_hex4<R: Read>(cur: &mut Cursor<R>) -> Result<u16, FlattenError> {
    let mut value: u16 = 0;
    for _ in 0..4 {
        let pos = cur.position();
        let b = match cur.next()? {
            Some(b) => b,
            None => {
                return Err(FlattenError::new(
                    FlattenErrorKind::UnexpectedEnd,
                    cur.position(),
                ));
            }
        };
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err(FlattenError::new(FlattenErrorKind::InvalidEscape, pos)),
        };
        value = (value << 4) | u16::from(digit);
    }
    Ok(value)
}
