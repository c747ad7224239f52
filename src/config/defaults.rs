// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Layout**: Anchor position and visibility cap
//! - **Durations**: Auto-dismiss delay per toast kind

use crate::notifications::Position;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Where the visible stack is anchored until configured otherwise.
pub const DEFAULT_POSITION: Position = Position::TopRight;

/// Maximum number of toasts visible at once.
pub const DEFAULT_MAX_TOASTS: usize = 5;

// ==========================================================================
// Duration Defaults (milliseconds, 0 = persistent)
// ==========================================================================

pub const DEFAULT_SUCCESS_DURATION_MS: u64 = 4_000;

pub const DEFAULT_INFO_DURATION_MS: u64 = 4_000;

/// Warnings stay a little longer than success/info.
pub const DEFAULT_WARNING_DURATION_MS: u64 = 5_000;

/// Errors stay longest so they can be read.
pub const DEFAULT_ERROR_DURATION_MS: u64 = 6_000;

/// Loading toasts are persistent until replaced or removed.
pub const DEFAULT_LOADING_DURATION_MS: u64 = 0;
