//! Integration tests running whole scripts

use pinframe::layout::{Direction, LayoutDirection, Rect};
use pinframe::{layout_source, parse, run_with_config, LayoutConfig, OutputFormat, RunConfig, RunError};

fn quiet() -> RunConfig {
    RunConfig::new().with_layout(LayoutConfig::default().with_warnings(false))
}

const TOOLBAR: &str = r#"
    // Right-to-left toolbar
    direction rtl
    view root [width: 300, height: 200] {
        view title [width: 100, height: 20]
        view icon [width: 20, height: 20]
        view body
        view badge [width: 10, height: 10, hidden: true]
    }

    title.top().start().margin_top(10).margin_start(10)
    icon.after(of: title, aligned: center).margin_start(8)
    icon.above(of: badge)
    body.below(of: [title, icon]).horizontally(10).bottom().margin_top(6).margin_bottom(10)
    /* anchors accept the same members as edges */
    badge.center(to: icon.top_left)
"#;

#[test]
fn test_toolbar_report() {
    let report = run_with_config(TOOLBAR, quiet()).expect("Should run");

    insta::assert_snapshot!(report, @r###"
    direction: rtl
    root: x=0 y=0 w=300 h=200
      title: x=190 y=10 w=100 h=20
      icon: x=162 y=10 w=20 h=20
      body: x=10 y=36 w=280 h=154
      badge: x=157 y=5 w=10 h=10 (hidden)
    warning: above(of: badge) won't be applied, at least one view must be visible (hidden views are ignored)
    "###);
}

#[test]
fn test_config_direction_is_overridden_by_script() {
    let config = LayoutConfig::default()
        .with_direction(LayoutDirection::Ltr)
        .with_warnings(false);
    let result = layout_source(TOOLBAR, &config).expect("Should run");
    assert_eq!(result.direction, Direction::Rtl);
}

#[test]
fn test_config_direction_applies_without_statement() {
    let source = r#"
        view root [width: 100, height: 100] {
            view a [x: 40, y: 40, width: 20, height: 20]
            view b [width: 10, height: 10]
        }
        b.after(of: a)
    "#;
    let ltr = layout_source(source, &LayoutConfig::default().with_warnings(false)).expect("ltr");
    let rtl = layout_source(
        source,
        &LayoutConfig::default()
            .with_direction(LayoutDirection::Rtl)
            .with_warnings(false),
    )
    .expect("rtl");

    assert_eq!(ltr.frame("b"), Some(Rect::new(60.0, 0.0, 10.0, 10.0)));
    assert_eq!(rtl.frame("b"), Some(Rect::new(30.0, 0.0, 10.0, 10.0)));
}

#[test]
fn test_nested_absolute_frames() {
    let source = r#"
        view root [width: 300, height: 300] {
            view panel [x: 50, y: 60, width: 200, height: 200] {
                view header [width: 10, height: 30]
                view content
            }
        }
        header.top().horizontally(0)
        content.below(of: header).left().right().bottom().margin(8)
    "#;
    let result = layout_source(source, &LayoutConfig::default()).expect("Should run");

    assert_eq!(result.frame("header"), Some(Rect::new(0.0, 0.0, 200.0, 30.0)));
    let content = result.get("content").expect("content");
    assert_eq!(content.frame, Rect::new(8.0, 38.0, 184.0, 154.0));
    assert_eq!(content.absolute, Rect::new(58.0, 98.0, 184.0, 154.0));
    assert_eq!(content.depth, 2);
    assert_eq!(content.parent.as_deref(), Some("panel"));
}

#[test]
fn test_svg_output() {
    let svg = run_with_config(TOOLBAR, quiet().with_format(OutputFormat::Svg)).expect("Should run");
    assert!(svg.contains(r#"<rect id="title" class="pf-view" x="190" y="10" width="100" height="20"/>"#));
    assert!(svg.contains(r#"class="pf-view pf-hidden""#));
    assert!(svg.contains(r#"viewBox="-20 -20 340 240""#));
}

#[test]
fn test_parse_error_is_reported_with_source() {
    let source = "view root [width: 10\nroot.left(0)";
    let err = run_with_config(source, quiet()).unwrap_err();
    assert!(matches!(err, RunError::Parse(_)));
    let report = err.format(source, "broken.pin");
    assert!(report.contains("broken.pin"));
}

#[test]
fn test_undefined_view_suggests_similar_name() {
    let source = "view root { view title view body }\nbody.below(of: titel)";
    let err = run_with_config(source, quiet()).unwrap_err();
    let report = err.format(source, "typo.pin");
    assert!(report.contains("undefined view 'titel'"));
    assert!(report.contains("did you mean: title"));
}

#[test]
fn test_parse_keeps_statement_order() {
    let doc = parse(TOOLBAR).expect("Should parse");
    assert_eq!(doc.statements.len(), 7);
}
