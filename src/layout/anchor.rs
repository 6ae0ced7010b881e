//! Anchors and edges of a view's frame
//!
//! ```text
//!  top_left      top_center      top_right
//!     o--------------o--------------o
//!     |                             |
//! center_left     center      center_right
//!     o              o              o
//!     |                             |
//!     o--------------o--------------o
//!  bottom_left  bottom_center  bottom_right
//! ```
//!
//! Anchors and edges are queries. They hold no coordinates of their own and
//! are evaluated against a frame only when resolved.

use std::fmt;

use super::direction::Direction;
use super::tree::ViewId;
use super::types::{Point, Rect};

/// Named reference point on a view's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    TopStart,
    TopEnd,
    CenterStart,
    CenterEnd,
    BottomStart,
    BottomEnd,
}

impl Anchor {
    pub const ALL: [Anchor; 15] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
        Anchor::TopStart,
        Anchor::TopEnd,
        Anchor::CenterStart,
        Anchor::CenterEnd,
        Anchor::BottomStart,
        Anchor::BottomEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopCenter => "top_center",
            Anchor::TopRight => "top_right",
            Anchor::CenterLeft => "center_left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomCenter => "bottom_center",
            Anchor::BottomRight => "bottom_right",
            Anchor::TopStart => "top_start",
            Anchor::TopEnd => "top_end",
            Anchor::CenterStart => "center_start",
            Anchor::CenterEnd => "center_end",
            Anchor::BottomStart => "bottom_start",
            Anchor::BottomEnd => "bottom_end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == name)
    }

    /// Split the anchor into the two edges that meet at it
    pub fn edges(&self) -> (HorizontalEdge, VerticalEdge) {
        use HorizontalEdge as H;
        use VerticalEdge as V;
        match self {
            Anchor::TopLeft => (H::Left, V::Top),
            Anchor::TopCenter => (H::HCenter, V::Top),
            Anchor::TopRight => (H::Right, V::Top),
            Anchor::CenterLeft => (H::Left, V::VCenter),
            Anchor::Center => (H::HCenter, V::VCenter),
            Anchor::CenterRight => (H::Right, V::VCenter),
            Anchor::BottomLeft => (H::Left, V::Bottom),
            Anchor::BottomCenter => (H::HCenter, V::Bottom),
            Anchor::BottomRight => (H::Right, V::Bottom),
            Anchor::TopStart => (H::Start, V::Top),
            Anchor::TopEnd => (H::End, V::Top),
            Anchor::CenterStart => (H::Start, V::VCenter),
            Anchor::CenterEnd => (H::End, V::VCenter),
            Anchor::BottomStart => (H::Start, V::Bottom),
            Anchor::BottomEnd => (H::End, V::Bottom),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge along the horizontal axis (an x coordinate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    Left,
    HCenter,
    Right,
    Start,
    End,
}

impl HorizontalEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalEdge::Left => "left",
            HorizontalEdge::HCenter => "h_center",
            HorizontalEdge::Right => "right",
            HorizontalEdge::Start => "start",
            HorizontalEdge::End => "end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(HorizontalEdge::Left),
            "h_center" => Some(HorizontalEdge::HCenter),
            "right" => Some(HorizontalEdge::Right),
            "start" => Some(HorizontalEdge::Start),
            "end" => Some(HorizontalEdge::End),
            _ => None,
        }
    }
}

impl fmt::Display for HorizontalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge along the vertical axis (a y coordinate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    Top,
    VCenter,
    Bottom,
}

impl VerticalEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalEdge::Top => "top",
            VerticalEdge::VCenter => "v_center",
            VerticalEdge::Bottom => "bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(VerticalEdge::Top),
            "v_center" => Some(VerticalEdge::VCenter),
            "bottom" => Some(VerticalEdge::Bottom),
            _ => None,
        }
    }
}

impl fmt::Display for VerticalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either kind of edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Horizontal(HorizontalEdge),
    Vertical(VerticalEdge),
}

impl Edge {
    pub fn from_name(name: &str) -> Option<Self> {
        HorizontalEdge::from_name(name)
            .map(Edge::Horizontal)
            .or_else(|| VerticalEdge::from_name(name).map(Edge::Vertical))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Horizontal(h) => h.as_str(),
            Edge::Vertical(v) => v.as_str(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An anchor on a specific view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub view: ViewId,
    pub anchor: Anchor,
}

impl AnchorRef {
    pub fn new(view: ViewId, anchor: Anchor) -> Self {
        Self { view, anchor }
    }
}

/// An edge on a specific view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef<E> {
    pub view: ViewId,
    pub edge: E,
}

impl<E> EdgeRef<E> {
    pub fn new(view: ViewId, edge: E) -> Self {
        Self { view, edge }
    }
}

impl Rect {
    /// Coordinate of a horizontal edge, with start/end read in `direction`
    pub fn horizontal_edge(&self, edge: HorizontalEdge, direction: Direction) -> f64 {
        match (edge, direction) {
            (HorizontalEdge::Left, _)
            | (HorizontalEdge::Start, Direction::Ltr)
            | (HorizontalEdge::End, Direction::Rtl) => self.min_x(),
            (HorizontalEdge::HCenter, _) => self.mid_x(),
            (HorizontalEdge::Right, _)
            | (HorizontalEdge::Start, Direction::Rtl)
            | (HorizontalEdge::End, Direction::Ltr) => self.max_x(),
        }
    }

    pub fn vertical_edge(&self, edge: VerticalEdge) -> f64 {
        match edge {
            VerticalEdge::Top => self.min_y(),
            VerticalEdge::VCenter => self.mid_y(),
            VerticalEdge::Bottom => self.max_y(),
        }
    }

    /// Point of an anchor, with start/end aliases read in `direction`
    pub fn anchor(&self, anchor: Anchor, direction: Direction) -> Point {
        let (h, v) = anchor.edges();
        Point::new(self.horizontal_edge(h, direction), self.vertical_edge(v))
    }
}
