//! Rolling window of the most recently dialed characters.

use heapless::Deque;

/// Bounded FIFO of dialed characters — queue, not stack, semantics.
///
/// `N` is the compile-time capacity; the runtime `max_depth` (≤ `N`) is the
/// sliding-window size. Pushing past the window drops the *oldest* character
/// so the buffer always holds the most recent `max_depth` presses in order.
/// Insertion order is significant: it is the candidate sample filename.
///
/// Only admitted keys belong here; the caller never pushes sentinels.
pub struct DialBuffer<const N: usize> {
    chars: Deque<char, N>,
    max_depth: usize,
}

impl<const N: usize> DialBuffer<N> {
    /// Buffer with the window set to the full capacity `N`.
    pub fn new() -> Self {
        Self {
            chars: Deque::new(),
            max_depth: N,
        }
    }

    /// Buffer with a window of `depth` characters (clamped to `N`).
    pub fn with_depth(depth: usize) -> Self {
        Self {
            chars: Deque::new(),
            max_depth: depth.min(N),
        }
    }

    /// Current window size.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Append `ch`, dropping the oldest character if the window is full.
    ///
    /// A zero-depth buffer ignores pushes entirely (dial accumulation
    /// disabled).
    pub fn push(&mut self, ch: char) {
        if self.max_depth == 0 {
            return;
        }
        while self.chars.len() >= self.max_depth {
            self.chars.pop_front();
        }
        // Cannot fail: max_depth <= N and we just made room.
        self.chars.push_back(ch).ok();
    }

    /// Drop everything dialed so far.
    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Number of characters currently buffered.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when nothing has been dialed.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The buffered characters, oldest first.
    pub fn contents(&self) -> heapless::String<N> {
        let mut out = heapless::String::new();
        for ch in &self.chars {
            out.push(*ch).ok();
        }
        out
    }
}

impl<const N: usize> Default for DialBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
