//! Core value types for the layout engine

use std::fmt;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A view frame: origin and size, expressed in the parent's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rect at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Translate the rect by the given offsets
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Compute the union of two rects (smallest rect containing both)
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.max_x().max(other.max_x());
        let bottom = self.max_y().max(other.max_y());
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} w={} h={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Additive inset on each side of a rect.
///
/// Used for margins, for pinning against the parent's edges and as padding
/// when wrapping content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Same inset on all four sides
    pub fn uniform(all: f64) -> Self {
        Self::new(all, all, all, all)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Horizontal alignment used by `above` and `below`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    /// Left under LTR, right under RTL
    Start,
    /// Right under LTR, left under RTL
    End,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Start => "start",
            HorizontalAlign::End => "end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(HorizontalAlign::Left),
            "center" => Some(HorizontalAlign::Center),
            "right" => Some(HorizontalAlign::Right),
            "start" => Some(HorizontalAlign::Start),
            "end" => Some(HorizontalAlign::End),
            _ => None,
        }
    }
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment used by `left_of`, `right_of`, `before` and `after`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(VerticalAlign::Top),
            "center" => Some(VerticalAlign::Center),
            "bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How `size_to_fit` uses the measured content size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitType {
    /// Keep the reference width, adjust the height
    Width,
    /// Keep the reference height, adjust the width
    Height,
    /// Like `Width`, but the measured width replaces the reference width
    WidthFlexible,
    /// Like `Height`, but the measured height replaces the reference height
    HeightFlexible,
}

impl FitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitType::Width => "width",
            FitType::Height => "height",
            FitType::WidthFlexible => "width_flexible",
            FitType::HeightFlexible => "height_flexible",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "width" => Some(FitType::Width),
            "height" => Some(FitType::Height),
            "width_flexible" => Some(FitType::WidthFlexible),
            "height_flexible" => Some(FitType::HeightFlexible),
            _ => None,
        }
    }
}

/// Which axes `wrap_content` adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapType {
    All,
    Width,
    Height,
}

impl WrapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapType::All => "all",
            WrapType::Width => "width",
            WrapType::Height => "height",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(WrapType::All),
            "width" => Some(WrapType::Width),
            "height" => Some(WrapType::Height),
            _ => None,
        }
    }

    pub fn wraps_width(&self) -> bool {
        matches!(self, WrapType::All | WrapType::Width)
    }

    pub fn wraps_height(&self) -> bool {
        matches!(self, WrapType::All | WrapType::Height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.max_x(), 110.0);
        assert_eq!(r.max_y(), 70.0);
        assert_eq!(r.mid_x(), 60.0);
        assert_eq!(r.mid_y(), 45.0);
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[test]
    fn test_rect_display() {
        let r = Rect::new(10.0, 2.5, 80.0, 20.0);
        assert_eq!(r.to_string(), "x=10 y=2.5 w=80 h=20");
    }

    #[test]
    fn test_insets_constructors() {
        assert_eq!(Insets::uniform(4.0), Insets::new(4.0, 4.0, 4.0, 4.0));
        let s = Insets::new(2.0, 10.0, 2.0, 10.0);
        assert_eq!(s.horizontal(), 20.0);
        assert_eq!(s.vertical(), 4.0);
    }

    #[test]
    fn test_align_names() {
        assert_eq!(HorizontalAlign::from_name("start"), Some(HorizontalAlign::Start));
        assert_eq!(VerticalAlign::from_name("bottom"), Some(VerticalAlign::Bottom));
        assert_eq!(VerticalAlign::from_name("start"), None);
        assert_eq!(FitType::from_name("width_flexible"), Some(FitType::WidthFlexible));
        assert!(WrapType::All.wraps_width() && WrapType::All.wraps_height());
        assert!(!WrapType::Width.wraps_height());
    }
}
