// SPDX-License-Identifier: MPL-2.0
//! Loading toasts driven by a future.
//!
//! [`Toaster::promise`] inserts a persistent loading toast immediately, then
//! returns a future that awaits the caller's operation, turns the same toast
//! into a success or error toast, and finally yields the operation's own
//! `Result` untouched.
//!
//! ```ignore
//! let user = toaster
//!     .promise(api.register(form), PromiseMessages::new(
//!         "Registering...",
//!         PromiseMessage::with(|user: &User| format!("Welcome, {}", user.name)),
//!         "Registration failed",
//!     ))?
//!     .await?;
//! ```

use super::record::{ToastId, ToastKind, ToastOptions, ToastPatch};
use super::toaster::Toaster;
use crate::error::Result;
use std::fmt;
use std::future::Future;

/// Title shown once an operation settles.
pub enum PromiseMessage<T: ?Sized> {
    Text(String),
    /// Computed from the resolved value or the rejection reason.
    With(Box<dyn FnOnce(&T) -> String + Send>),
}

impl<T: ?Sized> PromiseMessage<T> {
    pub fn with(f: impl FnOnce(&T) -> String + Send + 'static) -> Self {
        PromiseMessage::With(Box::new(f))
    }

    fn resolve(self, value: &T) -> String {
        match self {
            PromiseMessage::Text(text) => text,
            PromiseMessage::With(f) => f(value),
        }
    }
}

impl<T: ?Sized> From<&str> for PromiseMessage<T> {
    fn from(text: &str) -> Self {
        PromiseMessage::Text(text.to_string())
    }
}

impl<T: ?Sized> From<String> for PromiseMessage<T> {
    fn from(text: String) -> Self {
        PromiseMessage::Text(text)
    }
}

impl<T: ?Sized> fmt::Debug for PromiseMessage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            PromiseMessage::With(_) => f.write_str("With(..)"),
        }
    }
}

/// The three titles a tracked operation goes through.
#[derive(Debug)]
pub struct PromiseMessages<T, E> {
    pub loading: String,
    pub success: PromiseMessage<T>,
    pub error: PromiseMessage<E>,
}

impl<T, E> PromiseMessages<T, E> {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<PromiseMessage<T>>,
        error: impl Into<PromiseMessage<E>>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

impl Toaster {
    /// Tracks `operation` with a single toast.
    ///
    /// The loading toast exists as soon as this returns, before the future
    /// is first polled. Dropping the returned future without awaiting it
    /// leaves the loading toast in place until it is removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidToast`] if the loading title is empty;
    /// `operation` is then dropped without being polled.
    pub fn promise<F, T, E>(
        &self,
        operation: F,
        messages: PromiseMessages<T, E>,
    ) -> Result<impl Future<Output = std::result::Result<T, E>> + Send + 'static>
    where
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (_, tracked) = self.promise_with_id(operation, messages)?;
        Ok(tracked)
    }

    /// Same as [`Toaster::promise`], also returning the tracked toast's id so
    /// the caller can remove or inspect it.
    pub fn promise_with_id<F, T, E>(
        &self,
        operation: F,
        messages: PromiseMessages<T, E>,
    ) -> Result<(ToastId, impl Future<Output = std::result::Result<T, E>> + Send + 'static)>
    where
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let PromiseMessages {
            loading,
            success,
            error,
        } = messages;
        let id = self.loading(loading, ToastOptions::new().persistent())?;
        let toaster = self.clone();

        let tracked = async move {
            let outcome = operation.await;
            let patch = match &outcome {
                Ok(value) => settled(&toaster, ToastKind::Success, success.resolve(value)),
                Err(reason) => settled(&toaster, ToastKind::Error, error.resolve(reason)),
            };
            match toaster.update_toast(id, patch) {
                Ok(true) => {}
                Ok(false) => tracing::trace!(%id, "promise settled after its toast was removed"),
                Err(err) => tracing::warn!(%id, %err, "promise toast not updated"),
            }
            outcome
        };
        Ok((id, tracked))
    }
}

/// A blank computed title keeps whatever the toast already shows.
fn settled(toaster: &Toaster, kind: ToastKind, title: String) -> ToastPatch {
    let patch = ToastPatch::new()
        .kind(kind)
        .duration(toaster.default_duration(kind));
    if title.trim().is_empty() {
        patch
    } else {
        patch.title(title)
    }
}
