//! Layout direction (LTR/RTL) handling
//!
//! A pass resolves its direction exactly once; every start/end, before/after
//! decision made during that pass reads the resolved value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Requested direction, possibly deferring to the host's locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Use the host's current writing direction
    #[default]
    Auto,
    Ltr,
    Rtl,
}

impl LayoutDirection {
    /// Resolve to a concrete direction, using `locale` for `Auto`
    pub fn resolve(self, locale: Direction) -> Direction {
        match self {
            LayoutDirection::Auto => locale,
            LayoutDirection::Ltr => Direction::Ltr,
            LayoutDirection::Rtl => Direction::Rtl,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutDirection::Auto => "auto",
            LayoutDirection::Ltr => "ltr",
            LayoutDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid layout direction '{0}' (expected auto, ltr or rtl)")]
pub struct ParseDirectionError(pub String);

impl FromStr for LayoutDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(LayoutDirection::Auto),
            "ltr" => Ok(LayoutDirection::Ltr),
            "rtl" => Ok(LayoutDirection::Rtl),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Concrete direction of a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_ltr(self) -> bool {
        self == Direction::Ltr
    }

    /// Map a (start, end) pair to (left, right). Applying it to (left, right)
    /// gives back (start, end).
    pub fn start_end_insets(self, start: f64, end: f64) -> (f64, f64) {
        if self.is_ltr() {
            (start, end)
        } else {
            (end, start)
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => f.write_str("ltr"),
            Direction::Rtl => f.write_str("rtl"),
        }
    }
}
