use std::io::Read;

use super::cursor::Cursor;
use crate::error::{FlattenError, FlattenErrorKind};

/// Scan a strict JSON number starting with `first` (already consumed,
/// either `-` or a digit). The raw source text is returned untouched so
/// the flattener can emit it bit-for-bit.
pub(crate) fn parse_number<R: Read>(
    cur: &mut Cursor<R>,
    first: u8,
) -> Result<String, FlattenError> {
    let mut raw = String::new();
    raw.push(char::from(first));

    let lead = if first == b'-' {
        match cur.peek()? {
            Some(b @ b'0'..=b'9') => {
                cur.bump();
                raw.push(char::from(b));
                b
            }
            _ => {
                return Err(FlattenError::new(
                    FlattenErrorKind::InvalidNumber,
                    cur.position(),
                ));
            }
        }
    } else {
        first
    };

    // Integer part: a leading zero must stand alone.
    if lead != b'0' {
        take_digits(cur, &mut raw)?;
    } else if matches!(cur.peek()?, Some(b'0'..=b'9')) {
        return Err(FlattenError::new(
            FlattenErrorKind::InvalidNumber,
            cur.position(),
        ));
    }

    if let Some(b'.') = cur.peek()? {
        cur.bump();
        raw.push('.');
        require_digit(cur, &mut raw)?;
        take_digits(cur, &mut raw)?;
    }

    if let Some(b @ (b'e' | b'E')) = cur.peek()? {
        cur.bump();
        raw.push(char::from(b));
        if let Some(sign @ (b'+' | b'-')) = cur.peek()? {
            cur.bump();
            raw.push(char::from(sign));
        }
        require_digit(cur, &mut raw)?;
        take_digits(cur, &mut raw)?;
    }

    Ok(raw)
}

fn require_digit<R: Read>(cur: &mut Cursor<R>, raw: &mut String) -> Result<(), FlattenError> {
    match cur.peek()? {
        Some(b @ b'0'..=b'9') => {
            cur.bump();
            raw.push(char::from(b));
            Ok(())
        }
        _ => Err(FlattenError::new(
            FlattenErrorKind::InvalidNumber,
            cur.position(),
        )),
    }
}

fn take_digits<R: Read>(cur: &mut Cursor<R>, raw: &mut String) -> Result<(), FlattenError> {
    while let Some(b @ b'0'..=b'9') = cur.peek()? {
        cur.bump();
        raw.push(char::from(b));
    }
    Ok(())
}
