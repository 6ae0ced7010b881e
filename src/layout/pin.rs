//! Layout passes and the fluent pin builder
//!
//! A [`LayoutPass`] borrows the host for the duration of a pass and fixes the
//! layout direction. [`LayoutPass::pin`] opens a chain for one view; each call
//! on the returned [`Pin`] records a value immediately, and
//! [`Pin::layout`] derives the frame and commits it to the host.
//!
//! ```rust
//! use pinframe::layout::{CollectingSink, LayoutConfig, LayoutPass, Rect, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_root("root", Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap();
//! let title = tree.add_child(root, "title", Rect::new(10.0, 10.0, 100.0, 20.0)).unwrap();
//! let body = tree.add_child(root, "body", Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
//!
//! let mut sink = CollectingSink::new();
//! let config = LayoutConfig::default();
//! let mut pass = LayoutPass::new(&mut tree, &config, &mut sink);
//! let frame = pass.pin(body).below([title], None).margin_top(8.0).left(10.0).layout();
//!
//! assert_eq!(frame, Rect::new(10.0, 38.0, 100.0, 50.0));
//! ```

use super::anchor::{Anchor, AnchorRef, EdgeRef, HorizontalEdge, VerticalEdge};
use super::config::LayoutConfig;
use super::diagnostics::{
    target_context, value_context, wont_be_applied, DiagnosticSink, REASON_NOT_MEASURABLE,
    REASON_NO_CHILDREN, REASON_NO_PARENT, REASON_OTHER_HIERARCHY,
};
use super::direction::Direction;
use super::resolve::Resolver;
use super::tree::{ViewHost, ViewId};
use super::types::{FitType, Insets, Rect, Size, WrapType};

/// One layout pass over a host, with a fixed direction
pub struct LayoutPass<'a, H: ViewHost + ?Sized> {
    pub(crate) host: &'a mut H,
    config: LayoutConfig,
    direction: Direction,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a, H: ViewHost + ?Sized> LayoutPass<'a, H> {
    /// Open a pass. The direction is resolved here, once.
    pub fn new(host: &'a mut H, config: &LayoutConfig, sink: &'a mut dyn DiagnosticSink) -> Self {
        let direction = config.direction.resolve(host.locale_direction());
        Self {
            host,
            config: config.clone(),
            direction,
            sink,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_ltr(&self) -> bool {
        self.direction.is_ltr()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Start a pin chain for `view`
    pub fn pin(&mut self, view: ViewId) -> Pin<'_, 'a, H> {
        Pin {
            pass: self,
            view,
            pending: PendingFrame::default(),
        }
    }

    pub(crate) fn report(&mut self, context: &str, reason: &str) {
        let message = wont_be_applied(context, reason);
        if self.config.warnings {
            log::warn!("{}", message);
        }
        self.sink.report(&message);
    }
}

/// Values recorded by a pin chain, all in the parent's coordinate space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingFrame {
    pub top: Option<f64>,
    pub v_center: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub h_center: Option<f64>,
    pub right: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub margins: Insets,
    pub fit: Option<FitType>,
    pub wrap: Option<(WrapType, Insets)>,
}

/// Layout context of one view for one fluent chain
#[must_use = "a pin chain only takes effect once `layout()` is called"]
pub struct Pin<'p, 'a, H: ViewHost + ?Sized> {
    pub(crate) pass: &'p mut LayoutPass<'a, H>,
    pub(crate) view: ViewId,
    pending: PendingFrame,
}

impl<'p, 'a, H: ViewHost + ?Sized> Pin<'p, 'a, H> {
    pub fn view(&self) -> ViewId {
        self.view
    }

    pub(crate) fn describe(&self, view: ViewId) -> String {
        self.pass.host.describe(view)
    }

    pub(crate) fn report(&mut self, context: &str, reason: &str) {
        self.pass.report(context, reason);
    }

    fn record(view: &str, slot: &mut Option<f64>, name: &str, value: f64) {
        if let Some(previous) = *slot {
            if previous != value {
                log::debug!("{}: {} {} replaced by {}", view, name, previous, value);
            }
        }
        *slot = Some(value);
    }

    // ── Edges ─────────────────────────────────────────────────────────

    /// Write a horizontal edge; start/end are mapped through the pass direction
    pub fn set_horizontal(mut self, edge: HorizontalEdge, value: f64) -> Self {
        let name = self.describe(self.view);
        let (slot, physical) = match (edge, self.pass.direction) {
            (HorizontalEdge::Left, _)
            | (HorizontalEdge::Start, Direction::Ltr)
            | (HorizontalEdge::End, Direction::Rtl) => (&mut self.pending.left, "left"),
            (HorizontalEdge::HCenter, _) => (&mut self.pending.h_center, "h_center"),
            (HorizontalEdge::Right, _)
            | (HorizontalEdge::Start, Direction::Rtl)
            | (HorizontalEdge::End, Direction::Ltr) => (&mut self.pending.right, "right"),
        };
        Self::record(&name, slot, physical, value);
        self
    }

    pub fn set_vertical(mut self, edge: VerticalEdge, value: f64) -> Self {
        let name = self.describe(self.view);
        let slot = match edge {
            VerticalEdge::Top => &mut self.pending.top,
            VerticalEdge::VCenter => &mut self.pending.v_center,
            VerticalEdge::Bottom => &mut self.pending.bottom,
        };
        Self::record(&name, slot, edge.as_str(), value);
        self
    }

    pub fn top(self, value: f64) -> Self {
        self.set_vertical(VerticalEdge::Top, value)
    }

    pub fn v_center(self, value: f64) -> Self {
        self.set_vertical(VerticalEdge::VCenter, value)
    }

    pub fn bottom(self, value: f64) -> Self {
        self.set_vertical(VerticalEdge::Bottom, value)
    }

    pub fn left(self, value: f64) -> Self {
        self.set_horizontal(HorizontalEdge::Left, value)
    }

    pub fn h_center(self, value: f64) -> Self {
        self.set_horizontal(HorizontalEdge::HCenter, value)
    }

    pub fn right(self, value: f64) -> Self {
        self.set_horizontal(HorizontalEdge::Right, value)
    }

    pub fn start(self, value: f64) -> Self {
        self.set_horizontal(HorizontalEdge::Start, value)
    }

    pub fn end(self, value: f64) -> Self {
        self.set_horizontal(HorizontalEdge::End, value)
    }

    // ── Parent edges ──────────────────────────────────────────────────

    fn parent_size(&mut self, context: impl FnOnce() -> String) -> Option<Size> {
        match self.pass.host.parent(self.view) {
            Some(parent) => Some(self.pass.host.frame(parent).size()),
            None => {
                self.report(&context(), REASON_NO_PARENT);
                None
            }
        }
    }

    /// Pin a horizontal edge to the same edge of the parent
    pub fn pin_to_parent_horizontal(mut self, edge: HorizontalEdge) -> Self {
        let Some(parent) = self.parent_size(|| format!("{}()", edge)) else {
            return self;
        };
        let bounds = Rect::new(0.0, 0.0, parent.width, parent.height);
        let value = bounds.horizontal_edge(edge, self.pass.direction);
        self.set_horizontal(edge, value)
    }

    /// Pin a vertical edge to the same edge of the parent
    pub fn pin_to_parent_vertical(mut self, edge: VerticalEdge) -> Self {
        let Some(parent) = self.parent_size(|| format!("{}()", edge)) else {
            return self;
        };
        let bounds = Rect::new(0.0, 0.0, parent.width, parent.height);
        self.set_vertical(edge, bounds.vertical_edge(edge))
    }

    /// Pin all four edges to the parent, inset by `padding`
    pub fn all(mut self, padding: Insets) -> Self {
        let Some(parent) = self.parent_size(|| "all()".to_string()) else {
            return self;
        };
        self.top(padding.top)
            .left(padding.left)
            .bottom(parent.height - padding.bottom)
            .right(parent.width - padding.right)
    }

    /// Pin left and right to the parent, inset by `inset`
    pub fn horizontally(mut self, inset: f64) -> Self {
        let Some(parent) = self.parent_size(|| value_context("horizontally", inset)) else {
            return self;
        };
        self.left(inset).right(parent.width - inset)
    }

    /// Pin top and bottom to the parent, inset by `inset`
    pub fn vertically(mut self, inset: f64) -> Self {
        let Some(parent) = self.parent_size(|| value_context("vertically", inset)) else {
            return self;
        };
        self.top(inset).bottom(parent.height - inset)
    }

    pub fn center_in_parent(mut self) -> Self {
        let Some(parent) = self.parent_size(|| "center_in_parent()".to_string()) else {
            return self;
        };
        self.h_center(parent.width / 2.0).v_center(parent.height / 2.0)
    }

    // ── Edges and anchors of other views ──────────────────────────────

    fn resolver_space(&mut self, context: &dyn Fn() -> String) -> Option<ViewId> {
        let parent = self.pass.host.parent(self.view);
        if parent.is_none() {
            self.report(&context(), REASON_NO_PARENT);
        }
        parent
    }

    /// Pin one of the subject's horizontal edges to a horizontal edge of another view
    pub fn horizontal_to(mut self, edge: HorizontalEdge, target: EdgeRef<HorizontalEdge>) -> Self {
        let target_name = self.describe(target.view);
        let context = || target_context(edge.as_str(), &target_name, target.edge.as_str());
        let Some(space) = self.resolver_space(&context) else {
            return self;
        };
        let value = Resolver::new(&*self.pass.host, self.pass.direction, space).x(target);
        match value {
            Some(x) => self.set_horizontal(edge, x),
            None => {
                self.report(&context(), REASON_OTHER_HIERARCHY);
                self
            }
        }
    }

    /// Pin one of the subject's vertical edges to a vertical edge of another view
    pub fn vertical_to(mut self, edge: VerticalEdge, target: EdgeRef<VerticalEdge>) -> Self {
        let target_name = self.describe(target.view);
        let context = || target_context(edge.as_str(), &target_name, target.edge.as_str());
        let Some(space) = self.resolver_space(&context) else {
            return self;
        };
        let value = Resolver::new(&*self.pass.host, self.pass.direction, space).y(target);
        match value {
            Some(y) => self.set_vertical(edge, y),
            None => {
                self.report(&context(), REASON_OTHER_HIERARCHY);
                self
            }
        }
    }

    /// Place the subject's `anchor` on the target anchor's point
    pub fn anchor_to(mut self, anchor: Anchor, target: AnchorRef) -> Self {
        let target_name = self.describe(target.view);
        let context = || target_context(anchor.as_str(), &target_name, target.anchor.as_str());
        let Some(space) = self.resolver_space(&context) else {
            return self;
        };
        let point = Resolver::new(&*self.pass.host, self.pass.direction, space).point(target);
        match point {
            Some(p) => {
                let (h, v) = anchor.edges();
                self.set_horizontal(h, p.x).set_vertical(v, p.y)
            }
            None => {
                self.report(&context(), REASON_OTHER_HIERARCHY);
                self
            }
        }
    }

    // ── Size ──────────────────────────────────────────────────────────

    fn non_negative(&mut self, name: &str, value: f64) -> bool {
        if value < 0.0 {
            self.report(
                &value_context(name, value),
                &format!("the {} must be greater than or equal to zero", name),
            );
            return false;
        }
        true
    }

    pub fn width(mut self, value: f64) -> Self {
        if self.non_negative("width", value) {
            let name = self.describe(self.view);
            Self::record(&name, &mut self.pending.width, "width", value);
        }
        self
    }

    pub fn height(mut self, value: f64) -> Self {
        if self.non_negative("height", value) {
            let name = self.describe(self.view);
            Self::record(&name, &mut self.pending.height, "height", value);
        }
        self
    }

    pub fn size(self, size: Size) -> Self {
        self.width(size.width).height(size.height)
    }

    pub fn min_width(mut self, value: f64) -> Self {
        if self.non_negative("min_width", value) {
            self.pending.min_width = Some(value);
        }
        self
    }

    pub fn max_width(mut self, value: f64) -> Self {
        if self.non_negative("max_width", value) {
            self.pending.max_width = Some(value);
        }
        self
    }

    pub fn min_height(mut self, value: f64) -> Self {
        if self.non_negative("min_height", value) {
            self.pending.min_height = Some(value);
        }
        self
    }

    pub fn max_height(mut self, value: f64) -> Self {
        if self.non_negative("max_height", value) {
            self.pending.max_height = Some(value);
        }
        self
    }

    // ── Margins ───────────────────────────────────────────────────────

    pub fn margin_top(mut self, value: f64) -> Self {
        self.pending.margins.top = value;
        self
    }

    pub fn margin_left(mut self, value: f64) -> Self {
        self.pending.margins.left = value;
        self
    }

    pub fn margin_bottom(mut self, value: f64) -> Self {
        self.pending.margins.bottom = value;
        self
    }

    pub fn margin_right(mut self, value: f64) -> Self {
        self.pending.margins.right = value;
        self
    }

    fn margin_start_end(mut self, start: Option<f64>, end: Option<f64>) -> Self {
        let direction = self.pass.direction;
        let m = &mut self.pending.margins;
        let (current_start, current_end) = direction.start_end_insets(m.left, m.right);
        (m.left, m.right) = direction.start_end_insets(
            start.unwrap_or(current_start),
            end.unwrap_or(current_end),
        );
        self
    }

    pub fn margin_start(self, value: f64) -> Self {
        self.margin_start_end(Some(value), None)
    }

    pub fn margin_end(self, value: f64) -> Self {
        self.margin_start_end(None, Some(value))
    }

    pub fn margin_horizontal(self, value: f64) -> Self {
        self.margin_left(value).margin_right(value)
    }

    pub fn margin_vertical(self, value: f64) -> Self {
        self.margin_top(value).margin_bottom(value)
    }

    pub fn margin(mut self, insets: Insets) -> Self {
        self.pending.margins = insets;
        self
    }

    // ── Content ───────────────────────────────────────────────────────

    /// Size the view from its measured content when the frame is derived
    pub fn size_to_fit(mut self, fit: FitType) -> Self {
        self.pending.fit = Some(fit);
        self
    }

    /// Size the view around its visible children, shifting them so their
    /// union starts at the padding
    pub fn wrap_content(mut self, wrap: WrapType, padding: Insets) -> Self {
        self.pending.wrap = Some((wrap, padding));
        self
    }

    // ── Frame derivation ──────────────────────────────────────────────

    fn wrap_children(&mut self, wrap: WrapType, padding: Insets) -> (Option<f64>, Option<f64>) {
        let children = self.pass.host.children(self.view);
        let union = children
            .iter()
            .filter(|&&c| self.pass.host.is_eligible(c))
            .map(|&c| self.pass.host.frame(c))
            .reduce(|acc, f| acc.union(&f));
        let Some(union) = union else {
            self.report(&value_context("wrap_content", wrap.as_str()), REASON_NO_CHILDREN);
            return (None, None);
        };

        let dx = if wrap.wraps_width() { padding.left - union.x } else { 0.0 };
        let dy = if wrap.wraps_height() { padding.top - union.y } else { 0.0 };
        if dx != 0.0 || dy != 0.0 {
            for child in children {
                let frame = self.pass.host.frame(child);
                self.pass.host.set_frame(child, frame.offset(dx, dy));
            }
        }

        (
            wrap.wraps_width().then(|| union.width + padding.horizontal()),
            wrap.wraps_height().then(|| union.height + padding.vertical()),
        )
    }

    fn fit_content(&mut self, fit: FitType, reference: Size) -> (Option<f64>, Option<f64>) {
        let proposed = match fit {
            FitType::Width | FitType::WidthFlexible => Size::new(reference.width, f64::INFINITY),
            FitType::Height | FitType::HeightFlexible => Size::new(f64::INFINITY, reference.height),
        };
        let Some(measured) = self.pass.host.size_that_fits(self.view, proposed) else {
            self.report(&value_context("size_to_fit", fit.as_str()), REASON_NOT_MEASURABLE);
            return (None, None);
        };
        match fit {
            FitType::Width => (Some(reference.width), Some(measured.height)),
            FitType::Height => (Some(measured.width), Some(reference.height)),
            FitType::WidthFlexible | FitType::HeightFlexible => {
                (Some(measured.width), Some(measured.height))
            }
        }
    }

    /// Derive the frame from the recorded values and commit it to the host
    pub fn layout(mut self) -> Rect {
        let current = self.pass.host.frame(self.view);
        let p = self.pending.clone();
        let m = p.margins;

        let (wrapped_w, wrapped_h) = match p.wrap {
            Some((wrap, padding)) => self.wrap_children(wrap, padding),
            None => (None, None),
        };

        let reference = Size::new(
            span(p.left, p.right, m.left, m.right)
                .or(wrapped_w)
                .or(p.width)
                .unwrap_or(current.width),
            span(p.top, p.bottom, m.top, m.bottom)
                .or(wrapped_h)
                .or(p.height)
                .unwrap_or(current.height),
        );
        let (fitted_w, fitted_h) = match p.fit {
            Some(fit) => self.fit_content(fit, reference),
            None => (None, None),
        };

        let horizontal = Axis {
            min: p.left,
            mid: p.h_center,
            max: p.right,
            size: p.width,
            candidate: wrapped_w.or(fitted_w).or(p.width).unwrap_or(current.width),
            margin_min: m.left,
            margin_max: m.right,
            min_size: p.min_width,
            max_size: p.max_width,
            current: current.x,
            names: AxisNames::HORIZONTAL,
        };
        let vertical = Axis {
            min: p.top,
            mid: p.v_center,
            max: p.bottom,
            size: p.height,
            candidate: wrapped_h.or(fitted_h).or(p.height).unwrap_or(current.height),
            margin_min: m.top,
            margin_max: m.bottom,
            min_size: p.min_height,
            max_size: p.max_height,
            current: current.y,
            names: AxisNames::VERTICAL,
        };

        let (x, width) = horizontal.resolve(&mut *self.pass);
        let (y, height) = vertical.resolve(&mut *self.pass);
        let frame = Rect::new(x, y, width, height);

        log::debug!("{}: {}", self.describe(self.view), frame);
        self.pass.host.set_frame(self.view, frame);
        frame
    }
}

/// Distance between two pinned edges after margins
fn span(min: Option<f64>, max: Option<f64>, margin_min: f64, margin_max: f64) -> Option<f64> {
    match (min, max) {
        (Some(min), Some(max)) => Some((max - margin_max) - (min + margin_min)),
        _ => None,
    }
}

struct AxisNames {
    min: &'static str,
    mid: &'static str,
    max: &'static str,
    size: &'static str,
}

impl AxisNames {
    const HORIZONTAL: AxisNames = AxisNames {
        min: "left",
        mid: "h_center",
        max: "right",
        size: "width",
    };
    const VERTICAL: AxisNames = AxisNames {
        min: "top",
        mid: "v_center",
        max: "bottom",
        size: "height",
    };
}

/// Pinned values along one axis
struct Axis {
    min: Option<f64>,
    mid: Option<f64>,
    max: Option<f64>,
    /// Explicitly pinned size
    size: Option<f64>,
    /// Size used when the edges don't determine it
    candidate: f64,
    margin_min: f64,
    margin_max: f64,
    min_size: Option<f64>,
    max_size: Option<f64>,
    current: f64,
    names: AxisNames,
}

impl Axis {
    /// Returns (position, size)
    fn resolve<H: ViewHost + ?Sized>(&self, pass: &mut LayoutPass<'_, H>) -> (f64, f64) {
        let both = span(self.min, self.max, self.margin_min, self.margin_max);
        let pinned_pair = format!("{} and {} are already pinned", self.names.min, self.names.max);

        let mut size = match both {
            Some(span) => {
                if let Some(explicit) = self.size {
                    pass.report(&value_context(self.names.size, explicit), &pinned_pair);
                }
                span
            }
            None => self.candidate,
        };
        if let Some(max) = self.max_size {
            size = size.min(max);
        }
        if let Some(min) = self.min_size {
            size = size.max(min);
        }
        if size < 0.0 {
            pass.report(
                &value_context(self.names.size, size),
                "the computed size can't be negative, using 0",
            );
            size = 0.0;
        }

        if let Some(mid) = self.mid {
            if self.min.is_some() || self.max.is_some() {
                let reason = match (self.min, self.max) {
                    (Some(_), Some(_)) => pinned_pair.clone(),
                    (Some(_), None) => format!("{} is already pinned", self.names.min),
                    _ => format!("{} is already pinned", self.names.max),
                };
                pass.report(&value_context(self.names.mid, mid), &reason);
            }
        }

        let position = match (self.min, self.max, self.mid) {
            (Some(min), _, _) => min + self.margin_min,
            (None, Some(max), _) => max - self.margin_max - size,
            (None, None, Some(mid)) => mid - size / 2.0 + self.margin_min - self.margin_max,
            (None, None, None) => self.current,
        };
        (position, size)
    }
}
