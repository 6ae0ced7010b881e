//! Relative positioning: above, below, left of, right of, before and after
//!
//! Each operation reads one anchor on every eligible reference view, reduces
//! the resulting coordinates to the extreme value along the relation's axis,
//! and pins the subject's facing edge to it. An optional alignment pins the
//! subject along the cross axis as well.
//!
//! Validation happens in a fixed order and stops at the first failure:
//!
//! 1. the subject must have a parent
//! 2. at least one reference must be eligible (hidden views are dropped)
//! 3. every eligible reference must share the subject's hierarchy
//!
//! A failure reports exactly one diagnostic and leaves the chain untouched.

use super::anchor::{Anchor, AnchorRef, HorizontalEdge, VerticalEdge};
use super::diagnostics::{
    relative_context, REASON_NOT_VISIBLE, REASON_NO_PARENT, REASON_OTHER_HIERARCHY,
};
use super::direction::Direction;
use super::pin::Pin;
use super::reduce::Coordinates;
use super::resolve::Resolver;
use super::tree::{ViewHost, ViewId};
use super::types::{HorizontalAlign, Point, VerticalAlign};

/// The six public relative operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeOp {
    Above,
    Below,
    LeftOf,
    RightOf,
    Before,
    After,
}

impl RelativeOp {
    pub const ALL: [RelativeOp; 6] = [
        RelativeOp::Above,
        RelativeOp::Below,
        RelativeOp::LeftOf,
        RelativeOp::RightOf,
        RelativeOp::Before,
        RelativeOp::After,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeOp::Above => "above",
            RelativeOp::Below => "below",
            RelativeOp::LeftOf => "left_of",
            RelativeOp::RightOf => "right_of",
            RelativeOp::Before => "before",
            RelativeOp::After => "after",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Whether the alignment argument is horizontal (above/below)
    pub fn aligns_horizontally(&self) -> bool {
        matches!(self, RelativeOp::Above | RelativeOp::Below)
    }

    fn relation(self, direction: Direction) -> Relation {
        match self {
            RelativeOp::Above => Relation::Above,
            RelativeOp::Below => Relation::Below,
            RelativeOp::LeftOf => Relation::LeftOf,
            RelativeOp::RightOf => Relation::RightOf,
            RelativeOp::Before if direction.is_ltr() => Relation::LeftOf,
            RelativeOp::Before => Relation::RightOf,
            RelativeOp::After if direction.is_ltr() => Relation::RightOf,
            RelativeOp::After => Relation::LeftOf,
        }
    }
}

/// Physical relation after before/after have been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Above,
    Below,
    LeftOf,
    RightOf,
}

/// Cross-axis alignment: left/top, center, right/bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrossAlign {
    Min,
    Center,
    Max,
}

impl CrossAlign {
    fn horizontal(aligned: HorizontalAlign, direction: Direction) -> Self {
        match (aligned, direction) {
            (HorizontalAlign::Left, _)
            | (HorizontalAlign::Start, Direction::Ltr)
            | (HorizontalAlign::End, Direction::Rtl) => CrossAlign::Min,
            (HorizontalAlign::Center, _) => CrossAlign::Center,
            (HorizontalAlign::Right, _)
            | (HorizontalAlign::Start, Direction::Rtl)
            | (HorizontalAlign::End, Direction::Ltr) => CrossAlign::Max,
        }
    }

    fn vertical(aligned: VerticalAlign) -> Self {
        match aligned {
            VerticalAlign::Top => CrossAlign::Min,
            VerticalAlign::Center => CrossAlign::Center,
            VerticalAlign::Bottom => CrossAlign::Max,
        }
    }
}

/// Anchor read on every reference view
fn reference_anchor(relation: Relation, cross: Option<CrossAlign>) -> Anchor {
    use CrossAlign::*;
    match (relation, cross) {
        (Relation::Above, None | Some(Min)) => Anchor::TopLeft,
        (Relation::Above, Some(Center)) => Anchor::TopCenter,
        (Relation::Above, Some(Max)) => Anchor::TopRight,
        (Relation::Below, None | Some(Min)) => Anchor::BottomLeft,
        (Relation::Below, Some(Center)) => Anchor::BottomCenter,
        (Relation::Below, Some(Max)) => Anchor::BottomRight,
        (Relation::LeftOf, None | Some(Min)) => Anchor::TopLeft,
        (Relation::LeftOf, Some(Center)) => Anchor::CenterLeft,
        (Relation::LeftOf, Some(Max)) => Anchor::BottomLeft,
        (Relation::RightOf, None | Some(Min)) => Anchor::TopRight,
        (Relation::RightOf, Some(Center)) => Anchor::CenterRight,
        (Relation::RightOf, Some(Max)) => Anchor::BottomRight,
    }
}

impl<'p, 'a, H: ViewHost + ?Sized> Pin<'p, 'a, H> {
    /// Place the subject's bottom on the topmost top of `of`
    pub fn above(self, of: impl AsRef<[ViewId]>, aligned: Option<HorizontalAlign>) -> Self {
        self.relative_h(RelativeOp::Above, of.as_ref(), aligned)
    }

    /// Place the subject's top on the bottommost bottom of `of`
    pub fn below(self, of: impl AsRef<[ViewId]>, aligned: Option<HorizontalAlign>) -> Self {
        self.relative_h(RelativeOp::Below, of.as_ref(), aligned)
    }

    /// Place the subject's right on the leftmost left of `of`
    pub fn left_of(self, of: impl AsRef<[ViewId]>, aligned: Option<VerticalAlign>) -> Self {
        self.relative_v(RelativeOp::LeftOf, of.as_ref(), aligned)
    }

    /// Place the subject's left on the rightmost right of `of`
    pub fn right_of(self, of: impl AsRef<[ViewId]>, aligned: Option<VerticalAlign>) -> Self {
        self.relative_v(RelativeOp::RightOf, of.as_ref(), aligned)
    }

    /// `left_of` in LTR, `right_of` in RTL
    pub fn before(self, of: impl AsRef<[ViewId]>, aligned: Option<VerticalAlign>) -> Self {
        self.relative_v(RelativeOp::Before, of.as_ref(), aligned)
    }

    /// `right_of` in LTR, `left_of` in RTL
    pub fn after(self, of: impl AsRef<[ViewId]>, aligned: Option<VerticalAlign>) -> Self {
        self.relative_v(RelativeOp::After, of.as_ref(), aligned)
    }

    fn relative_h(self, op: RelativeOp, of: &[ViewId], aligned: Option<HorizontalAlign>) -> Self {
        let direction = self.pass.direction();
        let cross = aligned.map(|a| CrossAlign::horizontal(a, direction));
        self.relative(op, of, cross, aligned.map(|a| a.as_str()))
    }

    fn relative_v(self, op: RelativeOp, of: &[ViewId], aligned: Option<VerticalAlign>) -> Self {
        let cross = aligned.map(CrossAlign::vertical);
        self.relative(op, of, cross, aligned.map(|a| a.as_str()))
    }

    fn relative(
        mut self,
        op: RelativeOp,
        of: &[ViewId],
        cross: Option<CrossAlign>,
        aligned_name: Option<&str>,
    ) -> Self {
        let direction = self.pass.direction();
        let names: Vec<String> = of.iter().map(|&v| self.describe(v)).collect();
        let context = || relative_context(op.as_str(), &names, aligned_name);

        let Some(parent) = self.pass.host.parent(self.view) else {
            self.report(&context(), REASON_NO_PARENT);
            return self;
        };

        let eligible: Vec<ViewId> = of
            .iter()
            .copied()
            .filter(|&v| self.pass.host.is_eligible(v))
            .collect();
        if eligible.is_empty() {
            self.report(&context(), REASON_NOT_VISIBLE);
            return self;
        }

        let relation = op.relation(direction);
        let anchor = reference_anchor(relation, cross);
        let points: Option<Vec<Point>> = {
            let resolver = Resolver::new(&*self.pass.host, direction, parent);
            eligible
                .iter()
                .map(|&view| resolver.point(AnchorRef::new(view, anchor)))
                .collect()
        };
        let Some(coords) = points.and_then(Coordinates::new) else {
            self.report(&context(), REASON_OTHER_HIERARCHY);
            return self;
        };

        if self.pass.config().trace {
            for (view, point) in eligible.iter().zip(coords.points()) {
                log::trace!(
                    "{}: {}.{} at ({}, {})",
                    op,
                    self.describe(*view),
                    anchor,
                    point.x,
                    point.y
                );
            }
        }

        let pinned = match relation {
            Relation::Above => self.set_vertical(VerticalEdge::Bottom, coords.topmost()),
            Relation::Below => self.set_vertical(VerticalEdge::Top, coords.bottommost()),
            Relation::LeftOf => self.set_horizontal(HorizontalEdge::Right, coords.leftmost()),
            Relation::RightOf => self.set_horizontal(HorizontalEdge::Left, coords.rightmost()),
        };
        match cross {
            Some(cross) => pinned.align(relation, cross, &coords),
            None => pinned,
        }
    }

    /// Cross-axis follow-up of a relative operation
    fn align(self, relation: Relation, cross: CrossAlign, coords: &Coordinates) -> Self {
        match (relation, cross) {
            (Relation::Above | Relation::Below, CrossAlign::Min) => {
                self.set_horizontal(HorizontalEdge::Left, coords.leftmost())
            }
            (Relation::Above | Relation::Below, CrossAlign::Center) => {
                self.set_horizontal(HorizontalEdge::HCenter, coords.average_x())
            }
            (Relation::Above | Relation::Below, CrossAlign::Max) => {
                self.set_horizontal(HorizontalEdge::Right, coords.rightmost())
            }
            (Relation::LeftOf | Relation::RightOf, CrossAlign::Min) => {
                self.set_vertical(VerticalEdge::Top, coords.topmost())
            }
            (Relation::LeftOf | Relation::RightOf, CrossAlign::Center) => {
                self.set_vertical(VerticalEdge::VCenter, coords.average_y())
            }
            (Relation::LeftOf | Relation::RightOf, CrossAlign::Max) => {
                self.set_vertical(VerticalEdge::Bottom, coords.bottommost())
            }
        }
    }
}

impl std::fmt::Display for RelativeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::LayoutConfig;
    use crate::layout::diagnostics::CollectingSink;
    use crate::layout::direction::LayoutDirection;
    use crate::layout::pin::LayoutPass;
    use crate::layout::tree::ViewTree;
    use crate::layout::types::Rect;

    struct Scene {
        tree: ViewTree,
        a: ViewId,
        b: ViewId,
        subject: ViewId,
    }

    /// a at (100,100) 50x40, b at (200,60) 80x20, subject 40x10 at the origin
    fn scene() -> Scene {
        let mut tree = ViewTree::new();
        let root = tree.add_root("root", Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        let a = tree.add_child(root, "a", Rect::new(100.0, 100.0, 50.0, 40.0)).unwrap();
        let b = tree.add_child(root, "b", Rect::new(200.0, 60.0, 80.0, 20.0)).unwrap();
        let subject = tree.add_child(root, "subject", Rect::new(0.0, 0.0, 40.0, 10.0)).unwrap();
        Scene { tree, a, b, subject }
    }

    fn layout(
        tree: &mut ViewTree,
        direction: LayoutDirection,
        f: impl FnOnce(&mut LayoutPass<'_, ViewTree>) -> Rect,
    ) -> (Rect, Vec<String>) {
        let mut sink = CollectingSink::new();
        let config = LayoutConfig::default().with_direction(direction).with_warnings(false);
        let frame = {
            let mut pass = LayoutPass::new(tree, &config, &mut sink);
            f(&mut pass)
        };
        (frame, sink.into_messages())
    }

    #[test]
    fn test_reference_anchor_table() {
        use CrossAlign::*;
        assert_eq!(reference_anchor(Relation::Above, None), Anchor::TopLeft);
        assert_eq!(reference_anchor(Relation::Above, Some(Max)), Anchor::TopRight);
        assert_eq!(reference_anchor(Relation::Below, Some(Center)), Anchor::BottomCenter);
        assert_eq!(reference_anchor(Relation::LeftOf, Some(Max)), Anchor::BottomLeft);
        assert_eq!(reference_anchor(Relation::RightOf, None), Anchor::TopRight);
        assert_eq!(reference_anchor(Relation::RightOf, Some(Center)), Anchor::CenterRight);
    }

    #[test]
    fn test_before_after_follow_direction() {
        assert_eq!(RelativeOp::Before.relation(Direction::Ltr), Relation::LeftOf);
        assert_eq!(RelativeOp::Before.relation(Direction::Rtl), Relation::RightOf);
        assert_eq!(RelativeOp::After.relation(Direction::Ltr), Relation::RightOf);
        assert_eq!(RelativeOp::After.relation(Direction::Rtl), Relation::LeftOf);
    }

    #[test]
    fn test_below_single_reference() {
        let mut s = scene();
        let (subject, a) = (s.subject, s.a);
        let (frame, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([a], None).layout()
        });
        assert_eq!(frame, Rect::new(0.0, 140.0, 40.0, 10.0));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_horizontal_alignment_follows_direction() {
        use CrossAlign::*;
        let (ltr, rtl) = (Direction::Ltr, Direction::Rtl);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::Start, ltr), Min);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::Start, rtl), Max);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::End, ltr), Max);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::End, rtl), Min);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::Left, rtl), Min);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::Right, rtl), Max);
        assert_eq!(CrossAlign::horizontal(HorizontalAlign::Center, rtl), Center);
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let mut sink = CollectingSink::new();
        let config = LayoutConfig::default()
            .with_direction(LayoutDirection::Ltr)
            .with_warnings(false)
            .with_trace(true);
        let frame = {
            let mut pass = LayoutPass::new(&mut s.tree, &config, &mut sink);
            pass.pin(subject)
                .below([b, a], Some(HorizontalAlign::Center))
                .layout()
        };
        // top = 140, h_center = (240 + 125) / 2
        assert_eq!(frame, Rect::new(162.5, 140.0, 40.0, 10.0));
        assert!(sink.into_messages().is_empty());
    }

    #[test]
    fn test_below_uses_bottommost() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([b, a], None).layout()
        });
        assert_eq!(frame.y, 140.0);
    }

    #[test]
    fn test_above_uses_topmost() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).above([a, b], None).layout()
        });
        // bottom = 60
        assert_eq!(frame.y, 50.0);
    }

    #[test]
    fn test_below_aligned_center_averages() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([a, b], Some(HorizontalAlign::Center)).layout()
        });
        // centers 125 and 240
        assert_eq!(frame.mid_x(), 182.5);
        assert_eq!(frame.y, 140.0);
    }

    #[test]
    fn test_below_aligned_right() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([a, b], Some(HorizontalAlign::Right)).layout()
        });
        assert_eq!(frame.max_x(), 280.0);
    }

    #[test]
    fn test_above_aligned_start_under_rtl() {
        let mut s = scene();
        let (subject, a) = (s.subject, s.a);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Rtl, |p| {
            p.pin(subject).above([a], Some(HorizontalAlign::Start)).layout()
        });
        assert_eq!(frame, Rect::new(110.0, 90.0, 40.0, 10.0));
    }

    #[test]
    fn test_right_of_aligned_bottom() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).right_of([a, b], Some(VerticalAlign::Bottom)).layout()
        });
        assert_eq!(frame.x, 280.0);
        assert_eq!(frame.max_y(), 140.0);
    }

    #[test]
    fn test_left_of_aligned_top() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).left_of([b, a], Some(VerticalAlign::Top)).layout()
        });
        assert_eq!(frame, Rect::new(60.0, 60.0, 40.0, 10.0));
    }

    #[test]
    fn test_after_under_rtl_is_left_of() {
        let mut s = scene();
        let (subject, a) = (s.subject, s.a);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Rtl, |p| {
            p.pin(subject).after([a], Some(VerticalAlign::Center)).layout()
        });
        assert_eq!(frame.max_x(), 100.0);
        assert_eq!(frame.mid_y(), 120.0);
    }

    #[test]
    fn test_hidden_references_are_skipped() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        s.tree.set_hidden(a, true);
        let (frame, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([a, b], None).layout()
        });
        assert_eq!(frame.y, 80.0);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_empty_list_reports_once() {
        let mut s = scene();
        let subject = s.subject;
        let (frame, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).after(Vec::<ViewId>::new(), Some(VerticalAlign::Top)).layout()
        });
        assert_eq!(frame, Rect::new(0.0, 0.0, 40.0, 10.0));
        assert_eq!(
            diags,
            vec!["after(of: [], aligned: top) won't be applied, at least one view must be visible (hidden views are ignored)".to_string()]
        );
    }

    #[test]
    fn test_all_hidden_reports_once() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        s.tree.set_hidden(a, true);
        s.tree.set_hidden(b, true);
        let (_, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).above([a, b], Some(HorizontalAlign::Center)).layout()
        });
        assert_eq!(diags.len(), 1);
        assert!(diags[0].starts_with("above(of: [a, b], aligned: center) won't be applied"));
    }

    #[test]
    fn test_subject_without_parent() {
        let mut s = scene();
        let a = s.a;
        let lonely = s.tree.add_root("lonely", Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        let (frame, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(lonely).below([a], None).layout()
        });
        assert_eq!(frame, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            diags,
            vec!["below(of: a) won't be applied, the view must be added to a parent before being laid out".to_string()]
        );
    }

    #[test]
    fn test_reference_in_other_hierarchy() {
        let mut s = scene();
        let (subject, a) = (s.subject, s.a);
        let stray = s.tree.add_root("stray", Rect::zero()).unwrap();
        let (frame, diags) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).right_of([a, stray], None).layout()
        });
        assert_eq!(frame.x, 0.0);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].ends_with(REASON_OTHER_HIERARCHY));
    }

    #[test]
    fn test_nested_reference_converted() {
        let mut s = scene();
        let (subject, a) = (s.subject, s.a);
        let inner = s.tree.add_child(a, "inner", Rect::new(5.0, 5.0, 10.0, 10.0)).unwrap();
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(subject).below([inner], Some(HorizontalAlign::Left)).layout()
        });
        assert_eq!(frame, Rect::new(105.0, 115.0, 40.0, 10.0));
    }

    #[test]
    fn test_chained_references_see_committed_frames() {
        let mut s = scene();
        let (subject, a, b) = (s.subject, s.a, s.b);
        let (frame, _) = layout(&mut s.tree, LayoutDirection::Ltr, |p| {
            p.pin(b).below([a], None).layout();
            p.pin(subject).below([b], None).layout()
        });
        assert_eq!(frame.y, 160.0);
    }

    #[test]
    fn test_op_names_round_trip() {
        for op in RelativeOp::ALL {
            assert_eq!(RelativeOp::from_name(op.as_str()), Some(op));
        }
        assert!(RelativeOp::Below.aligns_horizontally());
        assert!(!RelativeOp::Before.aligns_horizontally());
    }
}
