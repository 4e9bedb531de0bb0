//! Debounce bookkeeping for edit propagation.
//!
//! Rapid keystrokes in the panel's editors are buffered and flushed to the
//! mutation bridge only after a quiet period. The platform layer owns the
//! actual timers; this module owns the policy (per-channel quiet periods)
//! and the generation accounting that guarantees only the final value of a
//! burst is propagated, even if a stale timer fires late.

/// Which edit stream a keystroke belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditChannel {
    Classes,
    Html,
    Attributes,
}

impl EditChannel {
    /// Quiet period before a buffered edit is flushed. HTML edits debounce
    /// slower because re-rendering them is heavier.
    pub const fn quiet_period_ms(self) -> u32 {
        match self {
            EditChannel::Classes | EditChannel::Attributes => 300,
            EditChannel::Html => 800,
        }
    }
}

/// Latest-value buffer with generation tracking.
///
/// Each `push` supersedes the previous value and returns a generation
/// token. A timer scheduled for an old generation finds nothing to flush:
/// `take_if_current` yields the value only to the newest token, exactly
/// once.
#[derive(Debug)]
pub struct PendingEdit<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for PendingEdit<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> PendingEdit<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a new value, superseding any pending one. Returns the
    /// generation token the flush timer must present.
    pub fn push(&mut self, value: T) -> u64 {
        self.value = Some(value);
        self.generation += 1;
        self.generation
    }

    /// Take the buffered value iff `generation` is still the newest.
    pub fn take_if_current(&mut self, generation: u64) -> Option<T> {
        if generation == self.generation {
            self.value.take()
        } else {
            None
        }
    }

    /// Discard any pending value and invalidate outstanding tokens. Used
    /// on teardown so a stale timer cannot fire after unmount.
    pub fn cancel(&mut self) {
        self.value = None;
        self.generation += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }
}
