// SPDX-License-Identifier: MPL-2.0
//! `toast_engine` manages the short-lived notifications of a web front end:
//! typed toasts, a visibility cap with a FIFO queue, auto-dismiss timers and
//! loading toasts that follow a future to completion.
//!
//! Rendering, routing and the REST client live elsewhere; they only call the
//! [`notifications::Toaster`] facade (or the process-wide helpers in
//! [`notifications::global`]) and subscribe to snapshots.

#![doc(html_root_url = "https://docs.rs/toast_engine/0.3.0")]

pub mod config;
pub mod error;
pub mod notifications;

pub use error::{Error, Result};
