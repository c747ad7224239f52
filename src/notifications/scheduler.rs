// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timers.
//!
//! Exactly one timer exists per visible toast with a non-zero duration. The
//! scheduler does not decide on its own when a record changes; after every
//! store mutation the owner calls [`Scheduler::reconcile`], which cancels
//! timers for records that are gone, hidden, persistent, or whose duration
//! changed, and arms timers for records that need one.
//!
//! Aborting a tokio task does not stop a timer that has already woken up and
//! is waiting to report. Each timer therefore carries a [`TimerToken`]; the
//! owner must check it with [`Scheduler::retire`] before acting on expiry.

use super::record::{Toast, ToastId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Identifies one arming of one toast's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    id: ToastId,
    generation: u64,
}

impl TimerToken {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }
}

/// Receives tokens of timers whose duration elapsed.
pub type ExpirySink = Arc<dyn Fn(TimerToken) + Send + Sync>;

#[derive(Debug)]
struct Timer {
    generation: u64,
    duration: Duration,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    runtime: Handle,
    sink: ExpirySink,
    timers: HashMap<ToastId, Timer>,
    next_generation: u64,
}

impl Scheduler {
    pub fn new(runtime: Handle, sink: ExpirySink) -> Self {
        Self {
            runtime,
            sink,
            timers: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Makes the set of armed timers match `toasts`.
    pub fn reconcile(&mut self, toasts: &[Toast]) {
        let wanted: HashMap<ToastId, Duration> = toasts
            .iter()
            .filter(|t| t.is_visible() && !t.is_persistent())
            .map(|t| (t.id(), t.duration()))
            .collect();

        let stale: Vec<ToastId> = self
            .timers
            .iter()
            .filter(|(id, timer)| wanted.get(*id) != Some(&timer.duration))
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            self.cancel(id);
        }

        for toast in toasts {
            let Some(&duration) = wanted.get(&toast.id()) else {
                continue;
            };
            if !self.timers.contains_key(&toast.id()) {
                self.arm(toast.id(), duration);
            }
        }
    }

    /// Starts a timer, replacing any existing one for the same toast.
    pub fn arm(&mut self, id: ToastId, duration: Duration) -> TimerToken {
        self.cancel(id);

        let token = TimerToken {
            id,
            generation: self.next_generation,
        };
        self.next_generation += 1;

        let sink = Arc::clone(&self.sink);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            sink(token);
        });
        tracing::trace!(%id, ?duration, "toast timer armed");

        self.timers.insert(
            id,
            Timer {
                generation: token.generation,
                duration,
                handle,
            },
        );
        token
    }

    /// Cancels the timer for `id`. Returns `false` if none was armed.
    pub fn cancel(&mut self, id: ToastId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                timer.handle.abort();
                tracing::trace!(%id, "toast timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }

    /// Consumes a fired token.
    ///
    /// Returns `true` only if `token` is still the live timer for its toast;
    /// the entry is then forgotten and the caller should remove the toast.
    pub fn retire(&mut self, token: TimerToken) -> bool {
        let current = self
            .timers
            .get(&token.id)
            .is_some_and(|timer| timer.generation == token.generation);
        if current {
            self.timers.remove(&token.id);
        } else {
            tracing::trace!(id = %token.id, "stale toast timer ignored");
        }
        current
    }

    #[must_use]
    pub fn is_armed(&self, id: ToastId) -> bool {
        self.timers.contains_key(&id)
    }

    #[must_use]
    pub fn armed(&self) -> HashSet<ToastId> {
        self.timers.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("timers", &self.timers)
            .field("next_generation", &self.next_generation)
            .finish_non_exhaustive()
    }
}
