//! Tick scheduling for the simulation loop
//!
//! The loop never waits on a clock itself. It asks a [`TickScheduler`] for
//! "one more tick" and later receives that tick's [`TickHandle`] back from the
//! host. Handles are never reused, which lets the loop recognize and drop a
//! tick that was scheduled before a stop or reset.

use bevy::prelude::*;

/// Identifies one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to request and cancel future ticks
pub trait TickScheduler {
    /// Request one tick; the host later delivers it with the returned handle
    fn schedule(&mut self) -> TickHandle;

    /// Withdraw a tick that has not been delivered yet
    fn cancel(&mut self, handle: TickHandle);
}

/// Single-flight scheduler polled once per host frame
///
/// At most one tick is outstanding. The host calls [`FrameScheduler::take_due`]
/// each frame and, if it yields a handle, delivers it to the loop.
#[derive(Resource, Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<TickHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the outstanding tick, if any
    pub fn take_due(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl TickScheduler for FrameScheduler {
    fn schedule(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        if let Some(replaced) = self.pending.replace(handle) {
            warn!(
                "Tick {} replaced before delivery; only one tick may be in flight",
                replaced.id()
            );
        }
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.schedule();
        assert_eq!(scheduler.take_due(), Some(first));
        let second = scheduler.schedule();
        assert_ne!(first, second);
    }

    #[test]
    fn test_take_due_consumes_the_tick() {
        let mut scheduler = FrameScheduler::new();
        assert_eq!(scheduler.take_due(), None);

        let handle = scheduler.schedule();
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.take_due(), Some(handle));
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn test_cancel_only_matching_handle() {
        let mut scheduler = FrameScheduler::new();
        let stale = scheduler.schedule();
        scheduler.cancel(stale);
        assert!(!scheduler.is_pending());

        let current = scheduler.schedule();
        scheduler.cancel(stale);
        assert_eq!(scheduler.take_due(), Some(current));
    }
}
