// SPDX-License-Identifier: MPL-2.0
//! Visibility cap enforcement.
//!
//! Records are kept in insertion order. Promotion walks that order from the
//! front (oldest queued first); demotion walks it from the back (newest
//! visible first), so the visible set always drifts toward the oldest records.

use super::record::{Toast, ToastId, ToastStatus};

/// A status change made by [`rebalance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Promoted(ToastId),
    Demoted(ToastId),
}

/// Brings the number of visible records back to exactly
/// `min(max_visible, toasts.len())`.
///
/// Returns the transitions in the order they were applied.
pub fn rebalance(toasts: &mut [Toast], max_visible: usize) -> Vec<Transition> {
    let mut visible = toasts.iter().filter(|t| t.is_visible()).count();
    let mut transitions = Vec::new();

    if visible < max_visible {
        for toast in toasts
            .iter_mut()
            .filter(|t| t.status() == ToastStatus::Queued)
        {
            if visible >= max_visible {
                break;
            }
            toast.set_status(ToastStatus::Visible);
            transitions.push(Transition::Promoted(toast.id()));
            visible += 1;
        }
    } else if visible > max_visible {
        for toast in toasts.iter_mut().rev().filter(|t| t.is_visible()) {
            if visible <= max_visible {
                break;
            }
            toast.set_status(ToastStatus::Queued);
            transitions.push(Transition::Demoted(toast.id()));
            visible -= 1;
        }
    }

    transitions
}
