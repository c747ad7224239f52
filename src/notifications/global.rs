// SPDX-License-Identifier: MPL-2.0
//! Process-wide toaster.
//!
//! Applications that do not want to thread a [`Toaster`] through their call
//! sites call [`init`] once at startup and [`dispose`] at shutdown; everything
//! in between goes through the free functions below.
//!
//! Mutating helpers return [`Error::NotInitialized`] outside that window.
//! Removal helpers stay idempotent and silently do nothing instead.

use super::bridge::PromiseMessages;
use super::position::Position;
use super::record::{Toast, ToastId, ToastOptions, ToastRequest};
use super::toaster::{Subscription, Toaster};
use crate::config::{Config, Settings};
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::future::Future;

static TOASTER: RwLock<Option<Toaster>> = parking_lot::const_rwlock(None);

/// Starts the process-wide toaster on the current tokio runtime.
///
/// Calling it again disposes the previous instance first.
pub fn init(settings: Settings) -> Result<Toaster> {
    let toaster = Toaster::new(settings)?;
    let previous = TOASTER.write().replace(toaster.clone());
    if let Some(previous) = previous {
        previous.clear_all_toasts();
    }
    tracing::debug!(
        position = %toaster.position(),
        max_toasts = toaster.max_toasts(),
        "toast engine initialized"
    );
    Ok(toaster)
}

/// Validates a provider configuration and starts the toaster with it.
pub fn init_with_config(config: &Config) -> Result<Toaster> {
    init(config.validate()?)
}

/// Clears every toast, cancels every timer and forgets the instance.
pub fn dispose() {
    if let Some(toaster) = TOASTER.write().take() {
        toaster.clear_all_toasts();
        tracing::debug!("toast engine disposed");
    }
}

#[must_use]
pub fn is_initialized() -> bool {
    TOASTER.read().is_some()
}

/// Returns a handle to the process-wide toaster.
pub fn toaster() -> Result<Toaster> {
    TOASTER.read().clone().ok_or(Error::NotInitialized)
}

pub fn add_toast(request: ToastRequest) -> Result<ToastId> {
    toaster()?.add_toast(request)
}

pub fn success(title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
    toaster()?.success(title, options)
}

pub fn error(title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
    toaster()?.error(title, options)
}

pub fn warning(title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
    toaster()?.warning(title, options)
}

pub fn info(title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
    toaster()?.info(title, options)
}

pub fn loading(title: impl Into<String>, options: ToastOptions) -> Result<ToastId> {
    toaster()?.loading(title, options)
}

pub fn remove_toast(id: ToastId) {
    if let Ok(toaster) = toaster() {
        toaster.remove_toast(id);
    }
}

pub fn clear_all_toasts() {
    if let Ok(toaster) = toaster() {
        toaster.clear_all_toasts();
    }
}

pub fn promise<F, T, E>(
    operation: F,
    messages: PromiseMessages<T, E>,
) -> Result<impl Future<Output = std::result::Result<T, E>> + Send + 'static>
where
    F: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    toaster()?.promise(operation, messages)
}

pub fn set_position(position: Position) -> Result<()> {
    toaster()?.set_position(position);
    Ok(())
}

pub fn configure(config: &Config) -> Result<()> {
    toaster()?.configure(config)
}

pub fn subscribe(listener: impl Fn(&[Toast]) + Send + Sync + 'static) -> Result<Subscription> {
    Ok(toaster()?.subscribe(listener))
}

/// Current records, or nothing before [`init`].
#[must_use]
pub fn snapshot() -> Vec<Toast> {
    toaster().map(|t| t.snapshot()).unwrap_or_default()
}
