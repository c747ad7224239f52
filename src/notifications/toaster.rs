// SPDX-License-Identifier: MPL-2.0
//! The toast facade.
//!
//! [`Toaster`] is the only surface the rest of an application talks to. It
//! owns the [`Store`] and the [`Scheduler`] behind one lock, and every public
//! mutation follows the same sequence:
//!
//! 1. lock, apply the store change (the queue rebalances inside the store)
//! 2. reconcile timers against the new state
//! 3. stage a snapshot, unlock
//! 4. run each listener with the staged snapshot
//!
//! Listeners run outside the lock, so they may call back into the toaster.
//! Only one thread delivers at a time. A mutation made while another thread
//! (or a listener on this one) is delivering replaces the staged snapshot,
//! and the delivering thread sends it once the current round is done, so the
//! last snapshot a listener sees is always the current state. Calls that
//! change nothing (removing an unknown id, for instance) do not notify.

use super::position::Position;
use super::record::{Toast, ToastId, ToastKind, ToastOptions, ToastPatch, ToastRequest};
use super::scheduler::{ExpirySink, Scheduler, TimerToken};
use super::store::{Listener, ListenerId, Store};
use crate::config::{Config, Settings};
use crate::error::{Error, Result};
use parking_lot::{Mutex, MutexGuard};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug)]
struct Engine {
    store: Store,
    scheduler: Scheduler,
    settings: Settings,
    /// Latest snapshot not yet handed to listeners.
    staged: Option<Vec<Toast>>,
    /// Set while some thread is running listeners.
    delivering: bool,
}

impl Engine {
    fn settle(&mut self) {
        self.scheduler.reconcile(self.store.toasts());
        self.staged = Some(self.store.snapshot());
    }

    fn next_delivery(&mut self) -> Option<(Vec<Toast>, Vec<Listener>)> {
        match self.staged.take() {
            Some(snapshot) => Some((snapshot, self.store.listeners())),
            None => {
                self.delivering = false;
                None
            }
        }
    }
}

/// Releases the delivery slot if a listener panics.
struct Delivery<'a>(&'a Mutex<Engine>);

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut engine = self.0.lock();
            engine.staged = None;
            engine.delivering = false;
        }
    }
}

/// Cheap, cloneable handle to one toast engine.
#[derive(Debug, Clone)]
pub struct Toaster {
    engine: Arc<Mutex<Engine>>,
}

/// Handle returned by [`Toaster::subscribe`].
///
/// Dropping it keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    engine: Weak<Mutex<Engine>>,
    id: ListenerId,
}

impl Subscription {
    /// Stops further notifications. Safe to call after the toaster is gone.
    pub fn unsubscribe(self) {
        if let Some(engine) = self.engine.upgrade() {
            engine.lock().store.unsubscribe(self.id);
        }
    }
}

impl Toaster {
    /// Creates a toaster whose timers run on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a runtime.
    pub fn new(settings: Settings) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_runtime(settings, runtime))
    }

    /// Creates a toaster whose timers are spawned on `runtime`.
    pub fn with_runtime(settings: Settings, runtime: Handle) -> Self {
        let engine = Arc::new_cyclic(|weak: &Weak<Mutex<Engine>>| {
            let weak = weak.clone();
            let sink: ExpirySink = Arc::new(move |token| {
                if let Some(engine) = weak.upgrade() {
                    Toaster { engine }.expire(token);
                }
            });
            Mutex::new(Engine {
                store: Store::new(settings.max_toasts),
                scheduler: Scheduler::new(runtime, sink),
                settings,
                staged: None,
                delivering: false,
            })
        });
        Self { engine }
    }

    /// Validates and inserts a toast, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToast`] for an empty title. Nothing is inserted.
    pub fn add_toast(&self, request: ToastRequest) -> Result<ToastId> {
        self.try_mutate(|engine| {
            let default = engine.settings.durations.for_kind(request.kind);
            let toast = Toast::from_request(request, default)?;
            log_added(&toast);
            Ok((engine.store.insert(toast), true))
        })
    }

    pub fn success(&self, title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
        self.add_kind(ToastKind::Success, title, options)
    }

    pub fn error(&self, title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
        self.add_kind(ToastKind::Error, title, options)
    }

    pub fn warning(&self, title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
        self.add_kind(ToastKind::Warning, title, options)
    }

    pub fn info(&self, title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
        self.add_kind(ToastKind::Info, title, options)
    }

    /// Adds a loading toast. It is persistent unless `options` sets a
    /// duration, so the caller is expected to remove or update it.
    pub fn loading(&self, title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
        self.add_kind(ToastKind::Loading, title, options)
    }

    fn add_kind(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        options: ToastOptions,
    ) -> Result<ToastId> {
        self.add_toast(ToastRequest::new(kind, title).with_options(options))
    }

    /// Replaces fields of an existing toast in place.
    ///
    /// A new duration restarts the auto-dismiss timer from zero. Returns
    /// `false` if the toast no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToast`] for a blank replacement title. The toast
    /// is left as it was and nobody is notified.
    pub fn update_toast(&self, id: ToastId, patch: ToastPatch) -> Result<bool> {
        self.try_mutate(|engine| {
            let found = engine.store.update(id, patch)?;
            if found {
                tracing::debug!(%id, "toast updated");
            }
            Ok((found, found))
        })
    }

    /// Removes a toast regardless of its `dismissible` flag. Unknown ids are
    /// ignored.
    pub fn remove_toast(&self, id: ToastId) {
        self.mutate(|engine| {
            let removed = engine.store.remove(id).is_some();
            if removed {
                tracing::debug!(%id, "toast removed");
            }
            ((), removed)
        });
    }

    /// Manual close from the rendering layer. Honours `dismissible`.
    ///
    /// Returns whether the toast was removed.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.mutate(|engine| {
            let allowed = engine.store.get(id).is_some_and(Toast::dismissible);
            if allowed {
                engine.store.remove(id);
                tracing::debug!(%id, "toast dismissed");
            }
            (allowed, allowed)
        })
    }

    /// Removes every toast and cancels every timer.
    pub fn clear_all_toasts(&self) {
        self.mutate(|engine| {
            engine.scheduler.cancel_all();
            let cleared = engine.store.clear();
            if cleared > 0 {
                tracing::debug!(cleared, "toasts cleared");
            }
            ((), cleared > 0)
        });
    }

    /// Runs the action attached to a toast. Returns `false` if there is none.
    pub fn trigger_action(&self, id: ToastId) -> bool {
        let action = {
            let engine = self.engine.lock();
            engine.store.get(id).and_then(|t| t.action().cloned())
        };
        match action {
            Some(action) => {
                tracing::debug!(%id, label = action.label(), "toast action triggered");
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Moves the visible stack. Records are neither moved nor reordered.
    pub fn set_position(&self, position: Position) {
        self.mutate(|engine| {
            let changed = engine.settings.position != position;
            engine.settings.position = position;
            ((), changed)
        });
    }

    /// Changes the visibility cap, promoting or demoting immediately.
    pub fn set_max_toasts(&self, max_toasts: usize) {
        self.mutate(|engine| {
            let changed = engine.settings.max_toasts != max_toasts;
            engine.settings.max_toasts = max_toasts;
            engine.store.set_max_visible(max_toasts);
            ((), changed)
        });
    }

    /// Applies the fields set in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] and keeps the previous settings if any
    /// field is invalid.
    pub fn configure(&self, config: &Config) -> Result<()> {
        self.try_mutate(|engine| {
            let settings = config.apply_to(&engine.settings).inspect_err(|err| {
                tracing::warn!(%err, "toast configuration rejected");
            })?;
            let changed = settings != engine.settings;
            engine.store.set_max_visible(settings.max_toasts);
            engine.settings = settings;
            Ok(((), changed))
        })
    }

    /// Registers `listener`, run after every mutation with the full snapshot.
    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + Send + Sync + 'static) -> Subscription {
        let id = self.engine.lock().store.subscribe(Arc::new(listener));
        Subscription {
            engine: Arc::downgrade(&self.engine),
            id,
        }
    }

    /// Every record, queued ones included, in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.engine.lock().store.snapshot()
    }

    /// Visible records only, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        let engine = self.engine.lock();
        engine
            .store
            .toasts()
            .iter()
            .filter(|t| t.is_visible())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.engine.lock().store.get(id).cloned()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.engine.lock().store.visible_count()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.engine.lock().store.queued_count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.lock().store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.lock().store.is_empty()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.engine.lock().settings.position
    }

    #[must_use]
    pub fn max_toasts(&self) -> usize {
        self.engine.lock().settings.max_toasts
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.engine.lock().settings.clone()
    }

    /// Configured auto-dismiss delay for `kind`.
    #[must_use]
    pub fn default_duration(&self, kind: ToastKind) -> Duration {
        self.engine.lock().settings.durations.for_kind(kind)
    }

    /// Number of auto-dismiss timers currently pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.engine.lock().scheduler.len()
    }

    fn expire(&self, token: TimerToken) {
        self.mutate(|engine| {
            if !engine.scheduler.retire(token) {
                return ((), false);
            }
            let id = token.id();
            let removed = engine.store.remove(id).is_some();
            if removed {
                tracing::debug!(%id, "toast expired");
            }
            ((), removed)
        });
    }

    /// Runs `f` under the lock, then notifies listeners if it reported a change.
    fn mutate<R>(&self, f: impl FnOnce(&mut Engine) -> (R, bool)) -> R {
        let mut engine = self.engine.lock();
        let (result, changed) = f(&mut *engine);
        self.publish(engine, changed);
        result
    }

    /// Like [`Toaster::mutate`] for changes that can be rejected. A rejected
    /// change must leave the engine untouched; nobody is notified.
    fn try_mutate<R>(&self, f: impl FnOnce(&mut Engine) -> Result<(R, bool)>) -> Result<R> {
        let mut engine = self.engine.lock();
        let (result, changed) = f(&mut *engine)?;
        self.publish(engine, changed);
        Ok(result)
    }

    /// Stages the new state and, unless another round is already running,
    /// delivers it after releasing the lock.
    fn publish(&self, mut engine: MutexGuard<'_, Engine>, changed: bool) {
        if !changed {
            return;
        }
        engine.settle();
        if engine.delivering {
            return;
        }
        engine.delivering = true;
        drop(engine);

        let _delivery = Delivery(&self.engine);
        loop {
            let next = self.engine.lock().next_delivery();
            let Some((snapshot, listeners)) = next else {
                break;
            };
            for listener in &listeners {
                listener(&snapshot);
            }
        }
    }
}

fn log_added(toast: &Toast) {
    let id = toast.id();
    match toast.kind() {
        ToastKind::Warning => tracing::warn!(%id, title = toast.title(), "warning toast"),
        ToastKind::Error => tracing::error!(%id, title = toast.title(), "error toast"),
        kind => tracing::debug!(%id, %kind, title = toast.title(), "toast added"),
    }
}
