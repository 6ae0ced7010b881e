//! Script execution
//!
//! A script runs in three steps: the `view` declarations build a
//! [`ViewTree`], every pin chain is compiled into typed operations (so a bad
//! name or argument fails before any frame moves), and a single
//! [`LayoutPass`] applies the chains in source order.

use crate::parser::ast::{Call, Document, Identifier, PinChain, Span, Spanned, Statement, Value, ViewDecl};

use super::anchor::{Anchor, AnchorRef, Edge, EdgeRef, HorizontalEdge, VerticalEdge};
use super::config::LayoutConfig;
use super::diagnostics::CollectingSink;
use super::direction::{Direction, LayoutDirection};
use super::error::LayoutError;
use super::find_similar;
use super::pin::{LayoutPass, Pin};
use super::relative::RelativeOp;
use super::resolve::absolute_frame;
use super::tree::{ViewId, ViewTree};
use super::types::{FitType, HorizontalAlign, Insets, Rect, Size, VerticalAlign, WrapType};

/// Final placement of one view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLayout {
    pub name: String,
    pub parent: Option<String>,
    pub depth: usize,
    /// Frame in the parent's coordinate space
    pub frame: Rect,
    /// Frame in root space
    pub absolute: Rect,
    pub hidden: bool,
}

/// Result of running a script
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Views in depth-first order
    pub views: Vec<ViewLayout>,
    /// Direction the pass ran with
    pub direction: Direction,
    /// "won't be applied" messages in the order they were reported
    pub diagnostics: Vec<String>,
}

impl LayoutResult {
    fn collect(tree: &ViewTree, direction: Direction, diagnostics: Vec<String>) -> Self {
        let views = tree
            .depth_first()
            .into_iter()
            .filter_map(|(id, depth)| {
                let node = tree.node(id)?;
                Some(ViewLayout {
                    name: node.name.clone(),
                    parent: node.parent.and_then(|p| tree.name(p)).map(str::to_string),
                    depth,
                    frame: node.frame,
                    absolute: absolute_frame(tree, id),
                    hidden: node.hidden,
                })
            })
            .collect();
        Self {
            views,
            direction,
            diagnostics,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ViewLayout> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Frame of `name` in its parent's space
    pub fn frame(&self, name: &str) -> Option<Rect> {
        self.get(name).map(|v| v.frame)
    }

    /// Union of the absolute frames of all visible views
    pub fn bounds(&self) -> Rect {
        self.views
            .iter()
            .filter(|v| !v.hidden)
            .map(|v| v.absolute)
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or_default()
    }
}

/// Build the view hierarchy declared by a script
pub fn build_tree(doc: &Document) -> Result<ViewTree, LayoutError> {
    let mut tree = ViewTree::new();
    for stmt in &doc.statements {
        if let Statement::View(decl) = &stmt.node {
            add_view(&mut tree, decl, None)?;
        }
    }
    Ok(tree)
}

fn add_view(tree: &mut ViewTree, decl: &ViewDecl, parent: Option<ViewId>) -> Result<(), LayoutError> {
    let mods = ViewModifiers::parse(decl)?;
    let name = decl.name.node.as_str();
    let id = tree
        .add(name, mods.frame, parent)
        .ok_or_else(|| LayoutError::duplicate(name, decl.name.span.clone()))?;
    if mods.hidden {
        tree.set_hidden(id, true);
    }
    if let Some(size) = mods.content {
        tree.set_content_size(id, size);
    }
    for child in &decl.children {
        add_view(tree, &child.node, Some(id))?;
    }
    Ok(())
}

/// Modifiers of a `view` declaration
struct ViewModifiers {
    frame: Rect,
    hidden: bool,
    content: Option<Size>,
}

impl ViewModifiers {
    fn parse(decl: &ViewDecl) -> Result<Self, LayoutError> {
        let mut mods = ViewModifiers {
            frame: Rect::zero(),
            hidden: false,
            content: None,
        };
        for modifier in &decl.modifiers {
            let invalid = |reason: String| LayoutError::invalid_argument("view", reason, modifier.span.clone());
            let Some(label) = &modifier.node.label else {
                return Err(invalid("view modifiers need a label, e.g. `width: 40`".to_string()));
            };
            let value = &modifier.node.value.node;
            let key = label.node.as_str();
            if key == "hidden" {
                mods.hidden = match value {
                    Value::Word(w) if w.as_str() == "true" => true,
                    Value::Word(w) if w.as_str() == "false" => false,
                    other => return Err(invalid(format!("hidden expects true or false, found {}", other.kind()))),
                };
                continue;
            }
            let Value::Number(n) = *value else {
                return Err(invalid(format!("{} expects a number, found {}", key, value.kind())));
            };
            match key {
                "x" => mods.frame.x = n,
                "y" => mods.frame.y = n,
                "width" | "height" | "content_width" | "content_height" if n < 0.0 => {
                    return Err(invalid(format!("{} can't be negative", key)));
                }
                "width" => mods.frame.width = n,
                "height" => mods.frame.height = n,
                "content_width" => mods.content.get_or_insert(Size::new(0.0, 0.0)).width = n,
                "content_height" => mods.content.get_or_insert(Size::new(0.0, 0.0)).height = n,
                other => {
                    let known = ["x", "y", "width", "height", "content_width", "content_height", "hidden"];
                    let mut reason = format!("unknown view modifier '{}'", other);
                    if let Some(best) = find_similar(known, other, 2).first() {
                        reason.push_str(&format!(" (did you mean '{}'?)", best));
                    }
                    return Err(invalid(reason));
                }
            }
        }
        Ok(mods)
    }
}

/// Relative operation with its typed alignment
#[derive(Debug, Clone, PartialEq)]
enum Relative {
    Above(Option<HorizontalAlign>),
    Below(Option<HorizontalAlign>),
    LeftOf(Option<VerticalAlign>),
    RightOf(Option<VerticalAlign>),
    Before(Option<VerticalAlign>),
    After(Option<VerticalAlign>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Dimension {
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
}

impl Dimension {
    const NAMES: [&'static str; 6] = ["width", "height", "min_width", "max_width", "min_height", "max_height"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "width" => Some(Dimension::Width),
            "height" => Some(Dimension::Height),
            "min_width" => Some(Dimension::MinWidth),
            "max_width" => Some(Dimension::MaxWidth),
            "min_height" => Some(Dimension::MinHeight),
            "max_height" => Some(Dimension::MaxHeight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MarginSide {
    Top,
    Left,
    Bottom,
    Right,
    Start,
    End,
    Horizontal,
    Vertical,
}

impl MarginSide {
    const NAMES: [&'static str; 8] = [
        "margin_top",
        "margin_left",
        "margin_bottom",
        "margin_right",
        "margin_start",
        "margin_end",
        "margin_horizontal",
        "margin_vertical",
    ];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "margin_top" => Some(MarginSide::Top),
            "margin_left" => Some(MarginSide::Left),
            "margin_bottom" => Some(MarginSide::Bottom),
            "margin_right" => Some(MarginSide::Right),
            "margin_start" => Some(MarginSide::Start),
            "margin_end" => Some(MarginSide::End),
            "margin_horizontal" => Some(MarginSide::Horizontal),
            "margin_vertical" => Some(MarginSide::Vertical),
            _ => None,
        }
    }
}

/// One compiled call of a pin chain
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Horizontal(HorizontalEdge, f64),
    Vertical(VerticalEdge, f64),
    ParentHorizontal(HorizontalEdge),
    ParentVertical(VerticalEdge),
    HorizontalTo(HorizontalEdge, EdgeRef<HorizontalEdge>),
    VerticalTo(VerticalEdge, EdgeRef<VerticalEdge>),
    AnchorTo(Anchor, AnchorRef),
    All(f64),
    Horizontally(f64),
    Vertically(f64),
    CenterInParent,
    Dimension(Dimension, f64),
    Size(Size),
    Margin(MarginSide, f64),
    Margins(Insets),
    SizeToFit(FitType),
    WrapContent(WrapType, Insets),
    Relative(Relative, Vec<ViewId>),
}

#[derive(Debug, Clone, PartialEq)]
struct CompiledChain {
    subject: ViewId,
    ops: Vec<Op>,
}

/// Every operation name a chain accepts
fn operation_names() -> Vec<&'static str> {
    let mut names = vec![
        "left", "h_center", "right", "start", "end", "top", "v_center", "bottom", "all",
        "horizontally", "vertically", "center_in_parent", "size", "margin", "size_to_fit",
        "wrap_content",
    ];
    names.extend(Anchor::ALL.iter().map(|a| a.as_str()));
    names.extend(Dimension::NAMES);
    names.extend(MarginSide::NAMES);
    names.extend(RelativeOp::ALL.iter().map(|op| op.as_str()));
    names
}

/// Arguments of one call. A bare argument at index `i` fills the `i`-th
/// parameter; a labeled one fills the parameter with that label.
struct CallArgs<'c> {
    call: &'c Call,
    span: Span,
}

impl<'c> CallArgs<'c> {
    fn new(call: &'c Spanned<Call>) -> Self {
        Self {
            call: &call.node,
            span: call.span.clone(),
        }
    }

    fn name(&self) -> &'c str {
        self.call.name.node.as_str()
    }

    fn invalid(&self, reason: impl Into<String>, span: Span) -> LayoutError {
        LayoutError::invalid_argument(self.name(), reason, span)
    }

    /// Reject labels and positions outside `params`
    fn expect(&self, params: &[&str]) -> Result<(), LayoutError> {
        for (index, arg) in self.call.args.iter().enumerate() {
            match &arg.node.label {
                Some(label) if !params.contains(&label.node.as_str()) => {
                    let mut reason = format!("unexpected argument '{}'", label.node);
                    if !params.is_empty() {
                        reason.push_str(&format!(" (expected {})", params.join(", ")));
                    }
                    return Err(self.invalid(reason, label.span.clone()));
                }
                None if index >= params.len() => {
                    let reason = match params.len() {
                        0 => "takes no arguments".to_string(),
                        1 => "takes at most 1 argument".to_string(),
                        n => format!("takes at most {} arguments", n),
                    };
                    return Err(self.invalid(reason, arg.span.clone()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn get(&self, label: &str, position: usize) -> Option<&'c Spanned<Value>> {
        self.call
            .labeled(label)
            .or_else(|| self.call.args.get(position).filter(|a| a.node.label.is_none()))
            .map(|a| &a.node.value)
    }

    fn number(&self, label: &str, position: usize) -> Result<Option<f64>, LayoutError> {
        match self.get(label, position) {
            None => Ok(None),
            Some(Spanned {
                node: Value::Number(n),
                ..
            }) => Ok(Some(*n)),
            Some(other) => Err(self.invalid(
                format!("{} expects a number, found {}", label, other.node.kind()),
                other.span.clone(),
            )),
        }
    }

    fn required_number(&self, label: &str, position: usize) -> Result<f64, LayoutError> {
        self.number(label, position)?
            .ok_or_else(|| self.invalid(format!("missing {}", label), self.span.clone()))
    }

    fn word(&self, label: &str, position: usize) -> Result<Option<(&'c Identifier, Span)>, LayoutError> {
        match self.get(label, position) {
            None => Ok(None),
            Some(Spanned {
                node: Value::Word(w),
                span,
            }) => Ok(Some((w, span.clone()))),
            Some(other) => Err(self.invalid(
                format!("{} expects a name, found {}", label, other.node.kind()),
                other.span.clone(),
            )),
        }
    }
}

fn resolve_view(tree: &ViewTree, name: &str, span: &Span) -> Result<ViewId, LayoutError> {
    tree.find(name).ok_or_else(|| {
        LayoutError::undefined(name, span.clone(), find_similar(tree.names(), name, 2))
    })
}

fn compile_chain(tree: &ViewTree, chain: &PinChain) -> Result<CompiledChain, LayoutError> {
    let subject = resolve_view(tree, chain.subject.node.as_str(), &chain.subject.span)?;
    let ops = chain
        .calls
        .iter()
        .map(|call| compile_call(tree, call))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompiledChain { subject, ops })
}

fn compile_call(tree: &ViewTree, call: &Spanned<Call>) -> Result<Op, LayoutError> {
    let args = CallArgs::new(call);
    let name = args.name();

    if let Some(op) = RelativeOp::from_name(name) {
        return compile_relative(tree, op, &args);
    }
    if let Some(edge) = Edge::from_name(name) {
        return compile_edge(tree, edge, &args);
    }
    if let Some(anchor) = Anchor::from_name(name) {
        args.expect(&["to"])?;
        let Some(target) = args.get("to", 0) else {
            return Err(args.invalid("missing to (e.g. `to: a.bottom_left`)", args.span.clone()));
        };
        let (view, member, member_span) = member_ref(tree, &args, target)?;
        let target_anchor = Anchor::from_name(member)
            .ok_or_else(|| args.invalid(format!("'{}' is not an anchor", member), member_span))?;
        return Ok(Op::AnchorTo(anchor, AnchorRef::new(view, target_anchor)));
    }
    if let Some(dimension) = Dimension::from_name(name) {
        args.expect(&["value"])?;
        return Ok(Op::Dimension(dimension, args.required_number("value", 0)?));
    }
    if let Some(side) = MarginSide::from_name(name) {
        args.expect(&["value"])?;
        return Ok(Op::Margin(side, args.required_number("value", 0)?));
    }

    match name {
        "all" | "horizontally" | "vertically" => {
            args.expect(&["inset"])?;
            let inset = args.number("inset", 0)?.unwrap_or(0.0);
            Ok(match name {
                "all" => Op::All(inset),
                "horizontally" => Op::Horizontally(inset),
                _ => Op::Vertically(inset),
            })
        }
        "center_in_parent" => {
            args.expect(&[])?;
            Ok(Op::CenterInParent)
        }
        "size" => {
            args.expect(&["width", "height"])?;
            let width = args.required_number("width", 0)?;
            let height = args.number("height", 1)?.unwrap_or(width);
            Ok(Op::Size(Size::new(width, height)))
        }
        "margin" => {
            args.expect(&["all", "top", "left", "bottom", "right"])?;
            if let Some(extra) = args.call.positional().nth(1) {
                return Err(args.invalid("takes at most 1 unlabeled argument", extra.span.clone()));
            }
            let all = args.number("all", 0)?.unwrap_or(0.0);
            Ok(Op::Margins(Insets::new(
                args.number("top", usize::MAX)?.unwrap_or(all),
                args.number("left", usize::MAX)?.unwrap_or(all),
                args.number("bottom", usize::MAX)?.unwrap_or(all),
                args.number("right", usize::MAX)?.unwrap_or(all),
            )))
        }
        "size_to_fit" => {
            args.expect(&["type"])?;
            let Some((word, span)) = args.word("type", 0)? else {
                return Err(args.invalid("missing type (width, height, width_flexible or height_flexible)", args.span.clone()));
            };
            let fit = FitType::from_name(word.as_str()).ok_or_else(|| {
                args.invalid(
                    format!("unknown fit type '{}' (expected width, height, width_flexible or height_flexible)", word),
                    span,
                )
            })?;
            Ok(Op::SizeToFit(fit))
        }
        "wrap_content" => {
            args.expect(&["type", "padding"])?;
            let wrap = match args.word("type", 0)? {
                None => WrapType::All,
                Some((word, span)) => WrapType::from_name(word.as_str()).ok_or_else(|| {
                    args.invalid(format!("unknown wrap type '{}' (expected all, width or height)", word), span)
                })?,
            };
            let padding = args.number("padding", 1)?.unwrap_or(0.0);
            Ok(Op::WrapContent(wrap, Insets::uniform(padding)))
        }
        _ => Err(LayoutError::unknown_operation(
            name,
            call.node.name.span.clone(),
            find_similar(operation_names(), name, 2),
        )),
    }
}

/// `top(10)`, `top()` (parent edge) or `top(to: a.bottom)`
fn compile_edge(tree: &ViewTree, edge: Edge, args: &CallArgs<'_>) -> Result<Op, LayoutError> {
    args.expect(&["to"])?;
    let Some(target) = args.get("to", 0) else {
        return Ok(match edge {
            Edge::Horizontal(h) => Op::ParentHorizontal(h),
            Edge::Vertical(v) => Op::ParentVertical(v),
        });
    };
    if let Value::Number(n) = target.node {
        return Ok(match edge {
            Edge::Horizontal(h) => Op::Horizontal(h, n),
            Edge::Vertical(v) => Op::Vertical(v, n),
        });
    }
    let (view, member, member_span) = member_ref(tree, args, target)?;
    match edge {
        Edge::Horizontal(h) => HorizontalEdge::from_name(member)
            .map(|target| Op::HorizontalTo(h, EdgeRef::new(view, target)))
            .ok_or_else(|| {
                args.invalid(
                    format!("'{}' is not a horizontal edge (left, h_center, right, start, end)", member),
                    member_span,
                )
            }),
        Edge::Vertical(v) => VerticalEdge::from_name(member)
            .map(|target| Op::VerticalTo(v, EdgeRef::new(view, target)))
            .ok_or_else(|| {
                args.invalid(
                    format!("'{}' is not a vertical edge (top, v_center, bottom)", member),
                    member_span,
                )
            }),
    }
}

fn member_ref<'v>(
    tree: &ViewTree,
    args: &CallArgs<'_>,
    value: &'v Spanned<Value>,
) -> Result<(ViewId, &'v str, Span), LayoutError> {
    match &value.node {
        Value::Member { view, member } => {
            let id = resolve_view(tree, view.node.as_str(), &view.span)?;
            Ok((id, member.node.as_str(), member.span.clone()))
        }
        other => Err(args.invalid(
            format!("expected a view member such as `a.bottom`, found {}", other.kind()),
            value.span.clone(),
        )),
    }
}

/// `below(of: a)`, `below(of: [a, b], aligned: center)`
fn compile_relative(tree: &ViewTree, op: RelativeOp, args: &CallArgs<'_>) -> Result<Op, LayoutError> {
    args.expect(&["of", "aligned"])?;
    let Some(of) = args.get("of", 0) else {
        return Err(args.invalid("missing of (a view or a list of views)", args.span.clone()));
    };
    let refs = match &of.node {
        Value::Word(name) => vec![resolve_view(tree, name.as_str(), &of.span)?],
        Value::List(items) => items
            .iter()
            .map(|item| match &item.node {
                Value::Word(name) => resolve_view(tree, name.as_str(), &item.span),
                other => Err(args.invalid(
                    format!("of expects view names, found {}", other.kind()),
                    item.span.clone(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(args.invalid(
                format!("of expects a view or a list of views, found {}", other.kind()),
                of.span.clone(),
            ))
        }
    };

    let aligned = args.word("aligned", 1)?;
    let relative = if op.aligns_horizontally() {
        let align = aligned
            .map(|(word, span)| {
                HorizontalAlign::from_name(word.as_str()).ok_or_else(|| {
                    args.invalid(
                        format!("unknown alignment '{}' (expected left, center, right, start or end)", word),
                        span,
                    )
                })
            })
            .transpose()?;
        match op {
            RelativeOp::Above => Relative::Above(align),
            _ => Relative::Below(align),
        }
    } else {
        let align = aligned
            .map(|(word, span)| {
                VerticalAlign::from_name(word.as_str()).ok_or_else(|| {
                    args.invalid(
                        format!("unknown alignment '{}' (expected top, center or bottom)", word),
                        span,
                    )
                })
            })
            .transpose()?;
        match op {
            RelativeOp::LeftOf => Relative::LeftOf(align),
            RelativeOp::RightOf => Relative::RightOf(align),
            RelativeOp::Before => Relative::Before(align),
            _ => Relative::After(align),
        }
    };
    Ok(Op::Relative(relative, refs))
}

fn apply<'p, 'a>(pin: Pin<'p, 'a, ViewTree>, op: &Op) -> Pin<'p, 'a, ViewTree> {
    match op {
        Op::Horizontal(edge, value) => pin.set_horizontal(*edge, *value),
        Op::Vertical(edge, value) => pin.set_vertical(*edge, *value),
        Op::ParentHorizontal(edge) => pin.pin_to_parent_horizontal(*edge),
        Op::ParentVertical(edge) => pin.pin_to_parent_vertical(*edge),
        Op::HorizontalTo(edge, target) => pin.horizontal_to(*edge, *target),
        Op::VerticalTo(edge, target) => pin.vertical_to(*edge, *target),
        Op::AnchorTo(anchor, target) => pin.anchor_to(*anchor, *target),
        Op::All(inset) => pin.all(Insets::uniform(*inset)),
        Op::Horizontally(inset) => pin.horizontally(*inset),
        Op::Vertically(inset) => pin.vertically(*inset),
        Op::CenterInParent => pin.center_in_parent(),
        Op::Dimension(dimension, value) => match dimension {
            Dimension::Width => pin.width(*value),
            Dimension::Height => pin.height(*value),
            Dimension::MinWidth => pin.min_width(*value),
            Dimension::MaxWidth => pin.max_width(*value),
            Dimension::MinHeight => pin.min_height(*value),
            Dimension::MaxHeight => pin.max_height(*value),
        },
        Op::Size(size) => pin.size(*size),
        Op::Margin(side, value) => match side {
            MarginSide::Top => pin.margin_top(*value),
            MarginSide::Left => pin.margin_left(*value),
            MarginSide::Bottom => pin.margin_bottom(*value),
            MarginSide::Right => pin.margin_right(*value),
            MarginSide::Start => pin.margin_start(*value),
            MarginSide::End => pin.margin_end(*value),
            MarginSide::Horizontal => pin.margin_horizontal(*value),
            MarginSide::Vertical => pin.margin_vertical(*value),
        },
        Op::Margins(insets) => pin.margin(*insets),
        Op::SizeToFit(fit) => pin.size_to_fit(*fit),
        Op::WrapContent(wrap, padding) => pin.wrap_content(*wrap, *padding),
        Op::Relative(relative, refs) => match relative {
            Relative::Above(aligned) => pin.above(refs, *aligned),
            Relative::Below(aligned) => pin.below(refs, *aligned),
            Relative::LeftOf(aligned) => pin.left_of(refs, *aligned),
            Relative::RightOf(aligned) => pin.right_of(refs, *aligned),
            Relative::Before(aligned) => pin.before(refs, *aligned),
            Relative::After(aligned) => pin.after(refs, *aligned),
        },
    }
}

fn parse_direction(word: &Spanned<Identifier>) -> Result<LayoutDirection, LayoutError> {
    word.node
        .as_str()
        .parse::<LayoutDirection>()
        .map_err(|e| LayoutError::invalid_argument("direction", e.to_string(), word.span.clone()))
}

/// Run a parsed script: build its views, then apply every chain in order
pub fn compute(doc: &Document, config: &LayoutConfig) -> Result<LayoutResult, LayoutError> {
    let mut tree = build_tree(doc)?;

    // The last `direction` statement wins for the whole pass
    let mut config = config.clone();
    let mut chains = Vec::new();
    for stmt in &doc.statements {
        match &stmt.node {
            Statement::View(_) => {}
            Statement::Direction(word) => config.direction = parse_direction(word)?,
            Statement::Chain(chain) => chains.push(compile_chain(&tree, chain)?),
        }
    }

    let mut sink = CollectingSink::new();
    let direction = {
        let mut pass = LayoutPass::new(&mut tree, &config, &mut sink);
        for chain in &chains {
            let mut pin = pass.pin(chain.subject);
            for op in &chain.ops {
                pin = apply(pin, op);
            }
            pin.layout();
        }
        pass.direction()
    };

    Ok(LayoutResult::collect(&tree, direction, sink.into_messages()))
}
