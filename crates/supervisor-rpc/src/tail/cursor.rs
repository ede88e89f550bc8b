//! Offset bookkeeping for the tail loop.

/// One decoded reply of a tail window fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailWindow {
    /// Trailing bytes of the log, at most the requested buffer size.
    pub text: String,
    /// Offset of the end of the log, in bytes.
    pub offset: u64,
    /// Set when the log grew by more than the requested buffer size.
    pub overflow: bool,
}

impl TailWindow {
    /// Creates a window.
    pub fn new(text: impl Into<String>, offset: u64, overflow: bool) -> Self {
        Self {
            text: text.into(),
            offset,
            overflow,
        }
    }

    /// A window carrying no data at offset zero.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// What the tail loop does with a fetched window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailStep<'w> {
    /// Nothing new; sleep before the next poll.
    Idle,
    /// New bytes arrived; emit `delta` when non-empty and poll again.
    Advance {
        /// Newly appended text.
        delta: &'w str,
    },
    /// More arrived than the window holds; emit the whole window and poll
    /// again without sleeping.
    Overflow {
        /// Entire window text.
        text: &'w str,
    },
}

/// Per-stream position of a tail loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailCursor {
    offset: u64,
    buffer_size: u32,
}

impl TailCursor {
    /// Creates a cursor at offset zero.
    #[must_use]
    pub const fn new(buffer_size: u32) -> Self {
        Self {
            offset: 0,
            buffer_size,
        }
    }

    /// Last offset observed.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes requested per poll.
    #[must_use]
    pub const fn buffer_size(&self) -> u32 {
        self.buffer_size
    }

    /// Compares `window` with the last observed offset and moves the cursor.
    ///
    /// An offset that did not grow leaves the cursor untouched. On the first
    /// growth from offset zero the old text is unknown, so the delta is
    /// empty. Otherwise the delta is the trailing `new - last` bytes of the
    /// window, widened to the whole window when it is shorter and moved
    /// forward to a character boundary when the cut lands inside one.
    pub fn advance<'w>(&mut self, window: &'w TailWindow) -> TailStep<'w> {
        if window.offset <= self.offset {
            return TailStep::Idle;
        }
        let appended = if self.offset == 0 {
            0
        } else {
            window.offset - self.offset
        };
        self.offset = window.offset;

        if window.overflow {
            return TailStep::Overflow { text: &window.text };
        }
        TailStep::Advance {
            delta: trailing(&window.text, appended),
        }
    }
}

fn trailing(text: &str, count: u64) -> &str {
    let wanted = usize::try_from(count).unwrap_or(usize::MAX);
    let Some(mut start) = text.len().checked_sub(wanted) else {
        return text;
    };
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text.get(start..).unwrap_or_default()
}
