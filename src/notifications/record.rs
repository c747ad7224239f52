// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! A [`Toast`] is only ever created from a validated [`ToastRequest`] and only
//! ever changed through a [`ToastPatch`] applied by the store.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a toast, never reused within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, handy as a render key.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// What a toast reports. Drives default duration and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
    /// An operation is still running; persistent until replaced or removed.
    Loading,
}

impl ToastKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
            ToastKind::Loading => "loading",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(ToastKind::Success),
            "error" => Ok(ToastKind::Error),
            "warning" => Ok(ToastKind::Warning),
            "info" => Ok(ToastKind::Info),
            "loading" => Ok(ToastKind::Loading),
            _ => Err(Error::InvalidToast(format!("unknown toast type '{s}'"))),
        }
    }
}

/// Display state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStatus {
    /// Held back by the visibility cap.
    Queued,
    Visible,
    /// Reported on the record handed back by a removal; never stored.
    Removed,
}

/// A single user-triggered affordance attached to a toast.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    on_click: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Arc::new(on_click),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback.
    pub fn invoke(&self) {
        (self.on_click)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Optional knobs shared by every typed constructor.
#[derive(Debug, Clone)]
pub struct ToastOptions {
    pub message: Option<String>,
    /// `None` picks the configured default for the toast's kind.
    pub duration: Option<Duration>,
    pub dismissible: bool,
    pub action: Option<ToastAction>,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            message: None,
            duration: None,
            dismissible: true,
            action: None,
        }
    }
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Shorthand for a zero duration: the toast never auto-dismisses.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    #[must_use]
    pub fn action(
        mut self,
        label: impl Into<String>,
        on_click: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.action = Some(ToastAction::new(label, on_click));
        self
    }
}

/// Input to `add_toast`: a kind, a title and options.
#[derive(Debug, Clone)]
pub struct ToastRequest {
    pub kind: ToastKind,
    pub title: String,
    pub options: ToastOptions,
}

impl ToastRequest {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            options: ToastOptions::default(),
        }
    }

    /// Builds a request from a textual kind, as received from a form or API payload.
    pub fn parse(kind: &str, title: impl Into<String>) -> Result<Self> {
        Ok(Self::new(kind.parse()?, title))
    }

    #[must_use]
    pub fn with_options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }

    /// Rejects requests that must never reach the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidToast("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Field replacements applied in place by the store's `update`.
///
/// `id`, `created_at`, and position in the display order are never touched.
#[derive(Debug, Clone, Default)]
pub struct ToastPatch {
    pub kind: Option<ToastKind>,
    pub title: Option<String>,
    /// `Some(None)` clears the message.
    pub message: Option<Option<String>>,
    pub duration: Option<Duration>,
    pub dismissible: Option<bool>,
}

impl ToastPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = Some(message);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    /// Rejects a replacement title that is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(Error::InvalidToast(
                "replacement title must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// A toast record as held by the store.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    message: Option<String>,
    /// Zero means persistent.
    duration: Duration,
    dismissible: bool,
    action: Option<ToastAction>,
    created_at: DateTime<Utc>,
    status: ToastStatus,
}

impl Toast {
    /// Builds a record from a validated request. The store assigns the status.
    pub(crate) fn from_request(request: ToastRequest, default_duration: Duration) -> Result<Self> {
        request.validate()?;
        let ToastRequest {
            kind,
            title,
            options,
        } = request;
        Ok(Self {
            id: ToastId::new(),
            kind,
            title,
            message: options.message,
            duration: options.duration.unwrap_or(default_duration),
            dismissible: options.dismissible,
            action: options.action,
            created_at: Utc::now(),
            status: ToastStatus::Queued,
        })
    }

    pub(crate) fn apply(&mut self, patch: ToastPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(dismissible) = patch.dismissible {
            self.dismissible = dismissible;
        }
    }

    pub(crate) fn set_status(&mut self, status: ToastStatus) {
        self.status = status;
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns whether the scheduler may remove this toast on its own.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }

    /// Whether the rendering layer should offer a close control.
    #[must_use]
    pub fn dismissible(&self) -> bool {
        self.dismissible
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn status(&self) -> ToastStatus {
        self.status
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.status == ToastStatus::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn toast(kind: ToastKind, title: &str) -> Toast {
        Toast::from_request(ToastRequest::new(kind, title), Duration::from_secs(4)).unwrap()
    }

    #[test]
    fn toast_ids_are_unique() {
        let t1 = toast(ToastKind::Success, "test");
        let t2 = toast(ToastKind::Success, "test");
        assert_ne!(t1.id(), t2.id());
    }

    #[test]
    fn empty_or_blank_title_is_rejected() {
        for title in ["", "   "] {
            let err = Toast::from_request(ToastRequest::new(ToastKind::Info, title), Duration::ZERO)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidToast(_)));
        }
    }

    #[test]
    fn blank_replacement_title_is_rejected() {
        assert!(ToastPatch::new().kind(ToastKind::Error).validate().is_ok());
        assert!(ToastPatch::new().title("Retry").validate().is_ok());
        assert!(matches!(
            ToastPatch::new().title("  \t").validate(),
            Err(Error::InvalidToast(_))
        ));
    }

    #[test]
    fn unknown_kind_string_is_rejected() {
        let err = ToastRequest::parse("fatal", "Boom").unwrap_err();
        assert!(matches!(err, Error::InvalidToast(msg) if msg.contains("fatal")));
        assert_eq!(
            ToastRequest::parse("Warning", "Careful").unwrap().kind,
            ToastKind::Warning
        );
    }

    #[test]
    fn missing_duration_falls_back_to_default() {
        let t = toast(ToastKind::Info, "hello");
        assert_eq!(t.duration(), Duration::from_secs(4));
        assert!(!t.is_persistent());
    }

    #[test]
    fn options_override_defaults() {
        let request = ToastRequest::new(ToastKind::Warning, "Disk almost full").with_options(
            ToastOptions::new()
                .message("2% left")
                .persistent()
                .dismissible(false),
        );
        let t = Toast::from_request(request, Duration::from_secs(5)).unwrap();

        assert_eq!(t.message(), Some("2% left"));
        assert!(t.is_persistent());
        assert!(!t.dismissible());
        assert_eq!(t.status(), ToastStatus::Queued);
    }

    #[test]
    fn patch_keeps_identity_and_creation_time() {
        let mut t = toast(ToastKind::Loading, "Saving");
        let (id, created_at) = (t.id(), t.created_at());

        t.apply(
            ToastPatch::new()
                .kind(ToastKind::Success)
                .title("Saved")
                .duration(Duration::from_secs(2)),
        );

        assert_eq!(t.id(), id);
        assert_eq!(t.created_at(), created_at);
        assert_eq!(t.kind(), ToastKind::Success);
        assert_eq!(t.title(), "Saved");
        assert_eq!(t.duration(), Duration::from_secs(2));
    }

    #[test]
    fn patch_can_clear_message() {
        let request = ToastRequest::new(ToastKind::Info, "Sync")
            .with_options(ToastOptions::new().message("details"));
        let mut t = Toast::from_request(request, Duration::ZERO).unwrap();

        t.apply(ToastPatch::new().message(None));
        assert!(t.message().is_none());
    }

    #[test]
    fn action_invokes_callback() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let action = ToastAction::new("Undo", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        action.invoke();
        action.invoke();

        assert_eq!(action.label(), "Undo");
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }
}
