// SPDX-License-Identifier: MPL-2.0
//! On-screen anchor for the visible toast stack.
//!
//! The engine only stores and reports the anchor; it never reorders records
//! when it changes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corner or edge where the rendering layer stacks visible toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Position {
    /// Every anchor, in declaration order.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopRight,
        Position::TopCenter,
        Position::BottomLeft,
        Position::BottomRight,
        Position::BottomCenter,
    ];

    /// Returns the kebab-case name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::TopCenter => "top-center",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::BottomCenter => "bottom-center",
        }
    }

    /// Whether new toasts stack downward from the top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopRight | Position::TopCenter
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidConfig(format!("unknown position '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_position_is_top_right() {
        assert_eq!(Position::default(), Position::TopRight);
    }

    #[test]
    fn parses_every_anchor_from_its_name() {
        for position in Position::ALL {
            assert_eq!(position.as_str().parse::<Position>().unwrap(), position);
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(
            " Bottom-Center ".parse::<Position>().unwrap(),
            Position::BottomCenter
        );
    }

    #[test]
    fn unknown_anchor_is_rejected() {
        let err = "middle".parse::<Position>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.contains("middle")));
    }

    #[test]
    fn only_top_anchors_report_top() {
        assert!(Position::TopCenter.is_top());
        assert!(!Position::BottomLeft.is_top());
    }
}
