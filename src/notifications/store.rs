// SPDX-License-Identifier: MPL-2.0
//! Ordered toast storage and subscriber registry.
//!
//! The store is the single source of truth: insertion order is display order,
//! and every status change goes through [`queue::rebalance`] so the visibility
//! cap holds after each call. The store itself never invokes subscribers;
//! the owner hands [`Store::listeners`] a snapshot once a mutation is complete.

use super::queue::{self, Transition};
use super::record::{Toast, ToastId, ToastPatch, ToastStatus};
use crate::error::Result;
use std::sync::Arc;

/// Callback run with the full ordered snapshot after every mutation.
pub type Listener = Arc<dyn Fn(&[Toast]) + Send + Sync>;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered collection of toast records.
pub struct Store {
    toasts: Vec<Toast>,
    max_visible: usize,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Store {
    pub fn new(max_visible: usize) -> Self {
        Self {
            toasts: Vec::new(),
            max_visible,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Appends a record, then lets the queue decide whether it is shown.
    pub fn insert(&mut self, toast: Toast) -> ToastId {
        let id = toast.id();
        self.toasts.push(toast);
        self.rebalance();
        id
    }

    /// Applies `patch` in place. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToast`] for a blank replacement title; the
    /// record is left untouched.
    pub fn update(&mut self, id: ToastId, patch: ToastPatch) -> Result<bool> {
        patch.validate()?;
        match self.toasts.iter_mut().find(|t| t.id() == id) {
            Some(toast) => {
                toast.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes a record and promotes from the queue if a slot opened.
    ///
    /// The returned record is marked [`ToastStatus::Removed`]. Unknown ids
    /// yield `None`.
    pub fn remove(&mut self, id: ToastId) -> Option<Toast> {
        let pos = self.toasts.iter().position(|t| t.id() == id)?;
        let mut removed = self.toasts.remove(pos);
        removed.set_status(ToastStatus::Removed);
        self.rebalance();
        Some(removed)
    }

    /// Empties the store, returning how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.toasts.len();
        self.toasts.clear();
        count
    }

    /// Changes the cap and immediately promotes or demotes to honour it.
    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.max_visible = max_visible;
        self.rebalance();
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Current records in display order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Owned copy of the current records, in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.clone()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.toasts.iter().filter(|t| t.is_visible()).count()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.toasts.len() - self.visible_count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Registers a listener.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if the listener was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Listeners to notify, cloned so they can run without borrowing the store.
    #[must_use]
    pub fn listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    fn rebalance(&mut self) {
        for transition in queue::rebalance(&mut self.toasts, self.max_visible) {
            match transition {
                Transition::Promoted(id) => tracing::debug!(%id, "toast promoted"),
                Transition::Demoted(id) => tracing::debug!(%id, "toast demoted"),
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("toasts", &self.toasts)
            .field("max_visible", &self.max_visible)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
