//! Timer-backed debouncing over the core edit buffer.
//!
//! Each channel owns one `gloo` timeout. Submitting a value supersedes
//! the previous timer (dropping a `Timeout` cancels it) and the
//! generation check in [`PendingEdit`] guards against a stale timer that
//! already left the queue when the supersession happened.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use eltools_core::{EditChannel, PendingEdit};

/// A debounced edit stream flushing at most one value per quiet period.
pub struct DebouncedChannel<T = String> {
    channel: EditChannel,
    pending: Rc<RefCell<PendingEdit<T>>>,
    timer: Option<Timeout>,
}

impl<T: 'static> DebouncedChannel<T> {
    pub fn new(channel: EditChannel) -> Self {
        Self {
            channel,
            pending: Rc::new(RefCell::new(PendingEdit::new())),
            timer: None,
        }
    }

    pub fn channel(&self) -> EditChannel {
        self.channel
    }

    /// Buffer `value` and (re)start the quiet-period timer. `flush` runs
    /// with the newest buffered value once the stream has been quiet for
    /// the channel's period.
    pub fn submit<F>(&mut self, value: T, flush: F)
    where
        F: FnOnce(T) + 'static,
    {
        let generation = self.pending.borrow_mut().push(value);
        let pending = Rc::clone(&self.pending);
        let timeout = Timeout::new(self.channel.quiet_period_ms(), move || {
            if let Some(value) = pending.borrow_mut().take_if_current(generation) {
                flush(value);
            }
        });
        // Replacing the slot drops and thereby cancels the previous timer.
        self.timer = Some(timeout);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_pending()
    }

    /// Drop the buffered value and the timer without flushing.
    pub fn cancel(&mut self) {
        self.timer = None;
        self.pending.borrow_mut().cancel();
    }
}

impl<T> Drop for DebouncedChannel<T> {
    fn drop(&mut self) {
        self.pending.borrow_mut().cancel();
    }
}
