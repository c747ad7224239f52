// SPDX-License-Identifier: MPL-2.0
//! Toast notification engine.
//!
//! This module manages short-lived, in-memory UI notifications: it keeps them
//! in display order, caps how many are visible, dismisses them on a timer,
//! and can tie one toast to the outcome of a future. Rendering is left to the
//! caller, which subscribes to snapshots.
//!
//! # Components
//!
//! - [`record`] - `Toast` record, kinds, statuses, request/patch types
//! - [`store`] - Ordered storage and listener registry
//! - [`queue`] - Visibility cap: FIFO promotion, newest-first demotion
//! - [`scheduler`] - One auto-dismiss timer per visible timed toast
//! - [`bridge`] - Loading toast that follows a future to success or error
//! - [`toaster`] - `Toaster`, the facade tying the above together
//! - [`global`] - Process-wide `Toaster` with `init`/`dispose`
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo() -> toast_engine::Result<()> {
//! use toast_engine::config::Settings;
//! use toast_engine::notifications::{Toaster, ToastOptions};
//!
//! let toaster = Toaster::new(Settings::default())?;
//! let _subscription = toaster.subscribe(|snapshot| {
//!     for toast in snapshot.iter().filter(|t| t.is_visible()) {
//!         println!("{}: {}", toast.kind(), toast.title());
//!     }
//! });
//! toaster.success("Registration saved", ToastOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Default durations: 4s success/info, 5s warning, 6s error, loading persistent
//! - Max visible toasts: 5 (others are queued, oldest promoted first)
//! - Position: top-right unless configured

pub mod bridge;
pub mod global;
pub mod position;
pub mod queue;
pub mod record;
pub mod scheduler;
pub mod store;
pub mod toaster;

pub use bridge::{PromiseMessage, PromiseMessages};
pub use position::Position;
pub use record::{
    Toast, ToastAction, ToastId, ToastKind, ToastOptions, ToastPatch, ToastRequest, ToastStatus,
};
pub use toaster::{Subscription, Toaster};
