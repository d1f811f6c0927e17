use std::fmt::Write as _;
use std::mem;

/// What kind of container a traversal frame represents. `Root` is the
/// implicit top-level frame with no keys or indices of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Root,
    Object,
    Array,
}

/// One level of nesting currently open during traversal.
///
/// Frames chain from the topmost frame down to the root; each frame
/// exclusively owns its parent, so the whole chain is reachable only
/// through the topmost frame and dies with it.
#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    /// Pending object key; non-empty only between reading a key and
    /// finishing its value.
    key: String,
    /// Zero-based position within an array frame.
    index: usize,
    parent: Option<Box<Frame>>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            key: String::new(),
            index: 0,
            parent: None,
        }
    }

    fn write_path(&self, out: &mut String) {
        if let Some(parent) = &self.parent {
            parent.write_path(out);
        }
        match self.kind {
            FrameKind::Object => {
                out.push('.');
                out.push_str(&self.key);
            }
            FrameKind::Array => {
                let _ = write!(out, ".[{}]", self.index);
            }
            FrameKind::Root => {}
        }
    }
}

/// Stack of open containers between the document root and the current
/// parse position.
pub(crate) struct FrameStack {
    top: Frame,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        Self {
            top: Frame::new(FrameKind::Root),
        }
    }

    pub(crate) fn push(&mut self, kind: FrameKind) {
        debug_assert!(kind != FrameKind::Root);
        let parent = mem::replace(&mut self.top, Frame::new(kind));
        self.top.parent = Some(Box::new(parent));
    }

    /// Close the topmost frame and run the post-emit step on its parent.
    ///
    /// Panics on underflow: a close token at the document root means the
    /// token source broke its contract, not that the input was bad.
    pub(crate) fn pop(&mut self) {
        let Some(parent) = self.top.parent.take() else {
            panic!("frame stack underflow: close token with no open frame at document root");
        };
        self.top = *parent;
        self.after_value();
    }

    /// True when the next string token is an object key, not a value.
    pub(crate) fn awaiting_key(&self) -> bool {
        self.top.kind == FrameKind::Object && self.top.key.is_empty()
    }

    /// Record a pending object key.
    ///
    /// Panics unless the topmost frame is an object with no key pending;
    /// a well-formed token stream can never get here otherwise.
    pub(crate) fn set_key(&mut self, key: String) {
        if !self.awaiting_key() {
            panic!(
                "key {:?} arrived while {:?} frame at path {:?} was not awaiting one",
                key,
                self.top.kind,
                self.path()
            );
        }
        self.top.key = key;
    }

    /// Bookkeeping after a value completes under the topmost frame: an
    /// array advances its index, an object clears its pending key.
    pub(crate) fn after_value(&mut self) {
        match self.top.kind {
            FrameKind::Object => self.top.key.clear(),
            FrameKind::Array => self.top.index += 1,
            FrameKind::Root => {}
        }
    }

    /// Dot/bracket path from the root to the current position: `.key`
    /// per object level, `.[index]` per array level, empty at the root.
    pub(crate) fn path(&self) -> String {
        let mut out = String::new();
        self.top.write_path(&mut out);
        out
    }

    /// Current nesting depth; zero when only the root frame is open.
    pub(crate) fn depth(&self) -> usize {
        let mut n = 0;
        let mut frame = &self.top;
        while let Some(parent) = &frame.parent {
            n += 1;
            frame = parent;
        }
        n
    }
}
