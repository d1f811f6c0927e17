pub mod cli;
pub mod cmd;
pub mod error;
mod flatten;
mod frame;
pub mod options;
mod token;
mod tokenizer;

pub use cmd::{Cmd, CmdReader};
pub use error::{FlattenError, FlattenErrorKind};
pub use flatten::{Signals, flatten};
pub use options::Options;
pub use token::{Token, TokenSource};
pub use tokenizer::Tokenizer;

use std::io::{Read, Write};

/// Flatten a single JSON document from a byte stream into `out`, one
/// `<path>\t<value>` line per scalar leaf, streaming all the way: the
/// input is tokenized incrementally and never materialized as a tree.
///
/// Returns the pagination signals captured from the reserved
/// `.pageInfo.hasNextPage` / `.pageInfo.endCursor` path suffixes.
pub fn flatten_reader<R, W>(src: R, out: &mut W, opts: &Options) -> Result<Signals, FlattenError>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut tokens = Tokenizer::with_buffer(src, opts.read_buffer);
    flatten(&mut tokens, out, opts.colorize)
}

/// Convenience: flatten a JSON document held in memory.
pub fn flatten_str<W>(input: &str, out: &mut W, opts: &Options) -> Result<Signals, FlattenError>
where
    W: Write + ?Sized,
{
    flatten_reader(input.as_bytes(), out, opts)
}

#[cfg(test)]
mod tests;
