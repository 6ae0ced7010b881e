//! Anchor and edge resolution into a subject's coordinate space
//!
//! A reference view may live anywhere in the same hierarchy as the subject.
//! Its anchors are converted into the coordinate space of the subject's
//! parent, since that is the space the subject's frame is expressed in.

use super::anchor::{AnchorRef, EdgeRef, HorizontalEdge, VerticalEdge};
use super::direction::Direction;
use super::tree::{ViewHost, ViewId};
use super::types::{Point, Rect};

/// Frame of `view` in root space
pub fn absolute_frame<H: ViewHost + ?Sized>(host: &H, view: ViewId) -> Rect {
    let mut frame = host.frame(view);
    let mut current = host.parent(view);
    while let Some(ancestor) = current {
        let origin = host.frame(ancestor).origin();
        frame = frame.offset(origin.x, origin.y);
        current = host.parent(ancestor);
    }
    frame
}

/// Topmost ancestor of `view` (the view itself for roots)
pub fn root_of<H: ViewHost + ?Sized>(host: &H, view: ViewId) -> ViewId {
    let mut current = view;
    while let Some(parent) = host.parent(current) {
        current = parent;
    }
    current
}

/// Reads anchors and edges of reference views, always from the host's
/// current frames
pub struct Resolver<'h, H: ViewHost + ?Sized> {
    host: &'h H,
    direction: Direction,
    space_root: ViewId,
    space_origin: Point,
}

impl<'h, H: ViewHost + ?Sized> Resolver<'h, H> {
    /// Resolve into the coordinate space of `space` (the subject's parent)
    pub fn new(host: &'h H, direction: Direction, space: ViewId) -> Self {
        Self {
            host,
            direction,
            space_root: root_of(host, space),
            space_origin: absolute_frame(host, space).origin(),
        }
    }

    /// Whether `view` can be converted into this resolver's space
    pub fn shares_hierarchy(&self, view: ViewId) -> bool {
        root_of(self.host, view) == self.space_root
    }

    fn local_frame(&self, view: ViewId) -> Option<Rect> {
        if !self.shares_hierarchy(view) {
            return None;
        }
        Some(absolute_frame(self.host, view).offset(-self.space_origin.x, -self.space_origin.y))
    }

    /// Point of the anchor, or `None` if the view is in another hierarchy
    pub fn point(&self, target: AnchorRef) -> Option<Point> {
        self.local_frame(target.view)
            .map(|f| f.anchor(target.anchor, self.direction))
    }

    pub fn x(&self, target: EdgeRef<HorizontalEdge>) -> Option<f64> {
        self.local_frame(target.view)
            .map(|f| f.horizontal_edge(target.edge, self.direction))
    }

    pub fn y(&self, target: EdgeRef<VerticalEdge>) -> Option<f64> {
        self.local_frame(target.view).map(|f| f.vertical_edge(target.edge))
    }
}
