//! Time source for elapsed-time bookkeeping.

use std::time::Instant;

/// A monotonic time source in milliseconds.
///
/// The engine reads it once at the start of every cycle.
pub struct Clock(Box<dyn Fn() -> u64>);

impl Clock {
    pub fn new(read: impl Fn() -> u64 + 'static) -> Self {
        Self(Box::new(read))
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn system() -> Self {
        let start = Instant::now();
        Self::new(move || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    pub fn now(&self) -> u64 {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
