use std::borrow::Cow;
use std::io::Write;

use crate::error::FlattenError;
use crate::frame::{FrameKind, FrameStack};
use crate::token::{Token, TokenSource};

/// Reserved path suffixes for pagination signal capture.
const PAGE_FLAG_SUFFIX: &str = ".pageInfo.hasNextPage";
const CURSOR_SUFFIX: &str = ".pageInfo.endCursor";

/// SGR codes used when colorizing: cyan paths, bold magenta numbers,
/// bold yellow booleans. Strings and nulls stay unadorned.
const PATH_STYLE: &str = "0;36";
const NUM_STYLE: &str = "35;1";
const BOOL_STYLE: &str = "33;1";

/// Pagination signals captured from the reserved `pageInfo` path
/// suffixes. When a document contains several paginated connections,
/// the last one in document order wins; that is documented behavior for
/// callers that paginate a single connection per request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub has_next_page: bool,
    /// Raw cursor string, before any record sanitization.
    pub end_cursor: String,
}

/// Flatten one JSON document from `tokens` into `out`, writing one
/// `<path>\t<value>\n` record per scalar leaf in document order.
/// Container boundaries produce no records.
///
/// Partial output written before an error is retained; the sink is
/// treated as append-only.
pub fn flatten<T, W>(tokens: &mut T, out: &mut W, colorize: bool) -> Result<Signals, FlattenError>
where
    T: TokenSource + ?Sized,
    W: Write + ?Sized,
{
    let mut frames = FrameStack::new();
    let mut sink = Sink { out, colorize };
    let mut signals = Signals::default();

    while let Some(token) = tokens.next_token()? {
        match token {
            Token::ObjectOpen => frames.push(FrameKind::Object),
            Token::ArrayOpen => frames.push(FrameKind::Array),
            Token::ObjectClose | Token::ArrayClose => frames.pop(),
            Token::Str(s) if frames.awaiting_key() => frames.set_key(s),
            Token::Str(s) => {
                let path = frames.path();
                if path.ends_with(CURSOR_SUFFIX) {
                    signals.end_cursor = s.clone();
                }
                sink.styled(PATH_STYLE, &path)?;
                sink.write("\t")?;
                sink.write(&sanitize(&s))?;
                sink.write("\n")?;
                frames.after_value();
            }
            Token::Num(raw) => {
                sink.styled(PATH_STYLE, &frames.path())?;
                sink.write("\t")?;
                sink.styled(NUM_STYLE, &raw)?;
                sink.write("\n")?;
                frames.after_value();
            }
            Token::Bool(v) => {
                let path = frames.path();
                if path.ends_with(PAGE_FLAG_SUFFIX) {
                    signals.has_next_page = v;
                }
                sink.styled(PATH_STYLE, &path)?;
                sink.write("\t")?;
                sink.styled(BOOL_STYLE, if v { "true" } else { "false" })?;
                sink.write("\n")?;
                frames.after_value();
            }
            Token::Null => {
                sink.styled(PATH_STYLE, &frames.path())?;
                sink.write("\t\n")?;
                frames.after_value();
            }
        }
    }

    // A conforming source only reports clean end of input on a balanced
    // document, so open frames here mean the source broke its contract.
    let depth = frames.depth();
    assert!(
        depth == 0,
        "token source reported end of input with {} open frame(s) at path {:?}",
        depth,
        frames.path()
    );
    Ok(signals)
}

struct Sink<'a, W: Write + ?Sized> {
    out: &'a mut W,
    colorize: bool,
}

impl<W: Write + ?Sized> Sink<'_, W> {
    fn write(&mut self, s: &str) -> Result<(), FlattenError> {
        self.out
            .write_all(s.as_bytes())
            .map_err(|e| FlattenError::io(e, 0))
    }

    /// Write `text` wrapped in the given SGR style when colorizing,
    /// plain otherwise. Wraps even empty text, so a bare top-level
    /// scalar still gets its (empty) path segment wrapped.
    fn styled(&mut self, style: &str, text: &str) -> Result<(), FlattenError> {
        if self.colorize {
            self.write("\x1b[")?;
            self.write(style)?;
            self.write("m")?;
            self.write(text)?;
            self.write("\x1b[m")
        } else {
            self.write(text)
        }
    }
}

/// Collapse literal CRLF pairs to LF, then escape any remaining LF as
/// the two characters `\n`, so every record stays on one line. A lone CR
/// passes through untouched.
fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\n', "\\n"))
}
