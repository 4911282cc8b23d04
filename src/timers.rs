//! Deferred-call registry.
//!
//! A fixed pool of one-shot software timers.  Each slot holds a boxed
//! callback and an absolute deadline; [`TimerPool::poll`] fires every
//! due callback, oldest registration first.  Callbacks receive the pool
//! itself plus a caller-supplied context, so a firing callback may
//! schedule or cancel other calls re-entrantly.
//!
//! ```text
//!   schedule(now, delay, cb) ──▶ [slot 0..CAP] ──▶ poll(now, ctx)
//!                                    │                  │
//!                                    └── cancel(handle) ┴─▶ cb(pool, ctx)
//! ```
//!
//! Time never advances inside the pool; the driver passes `now` in.

use log::warn;

use crate::config::TIMER_POOL_CAPACITY;

/// One-shot deferred call.  Receives the pool for re-entrant
/// scheduling and the driver's context object.
pub type TimerCallback<Ctx> = Box<dyn FnOnce(&mut TimerPool<Ctx>, &mut Ctx)>;

/// Handle to a scheduled call.  Generation-counted: once the slot has
/// fired or been cancelled, the handle goes stale and further cancels
/// through it are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    slot: u8,
    generation: u16,
}

struct Slot<Ctx> {
    deadline_ms: u64,
    /// Registration order, used to fire due calls oldest-first.
    seq: u64,
    generation: u16,
    callback: Option<TimerCallback<Ctx>>,
}

/// Fixed-capacity pool of one-shot software timers.
pub struct TimerPool<Ctx> {
    slots: [Slot<Ctx>; TIMER_POOL_CAPACITY],
    next_seq: u64,
}

impl<Ctx> TimerPool<Ctx> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot {
                deadline_ms: 0,
                seq: 0,
                generation: 0,
                callback: None,
            }),
            next_seq: 0,
        }
    }

    /// Registers `callback` to fire once `delay_ms` after `now_ms`.
    ///
    /// Returns `None` when every slot is occupied; the call is dropped
    /// and a warning logged.  A zero delay fires on the next poll.
    pub fn schedule(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        callback: TimerCallback<Ctx>,
    ) -> Option<TimerHandle> {
        let idx = self.slots.iter().position(|s| s.callback.is_none())?;
        let slot = &mut self.slots[idx];
        slot.deadline_ms = now_ms + delay_ms;
        slot.seq = self.next_seq;
        slot.callback = Some(callback);
        self.next_seq += 1;
        Some(TimerHandle {
            slot: idx as u8,
            generation: slot.generation,
        })
    }

    /// Like [`schedule`](Self::schedule) but logs when the pool is full,
    /// for call sites that cannot do anything useful with the handle.
    pub fn schedule_or_drop(&mut self, now_ms: u64, delay_ms: u64, callback: TimerCallback<Ctx>) {
        if self.schedule(now_ms, delay_ms, callback).is_none() {
            warn!("timer pool exhausted, deferred call dropped");
        }
    }

    /// Cancels a pending call.  Stale handles (already fired or
    /// cancelled) are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        let slot = &mut self.slots[handle.slot as usize];
        if slot.generation == handle.generation && slot.callback.is_some() {
            slot.callback = None;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }

    /// True while the call behind `handle` is still pending.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        let slot = &self.slots[handle.slot as usize];
        slot.generation == handle.generation && slot.callback.is_some()
    }

    /// Number of occupied slots.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.callback.is_some()).count()
    }

    /// Fires every call whose deadline has passed, oldest registration
    /// first.  A firing callback may schedule new calls; a zero-delay
    /// call scheduled from inside a callback fires in this same pass.
    /// At most `TIMER_POOL_CAPACITY` calls fire per pass so a
    /// self-rescheduling callback cannot stall the driver.
    pub fn poll(&mut self, now_ms: u64, ctx: &mut Ctx) {
        for _ in 0..TIMER_POOL_CAPACITY {
            let Some(idx) = self.next_due(now_ms) else {
                break;
            };
            let slot = &mut self.slots[idx];
            // free the slot before invoking so the callback can reuse it
            let callback = slot.callback.take();
            slot.generation = slot.generation.wrapping_add(1);
            if let Some(callback) = callback {
                callback(self, ctx);
            }
        }
    }

    fn next_due(&self, now_ms: u64) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.callback.is_some() && s.deadline_ms <= now_ms)
            .min_by_key(|(_, s)| s.seq)
            .map(|(idx, _)| idx)
    }
}

impl<Ctx> Default for TimerPool<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
