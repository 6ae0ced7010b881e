//! Plain-text frame report

use crate::layout::LayoutResult;

/// One line per view, indented by depth, followed by the diagnostics.
///
/// ```text
/// direction: ltr
/// root: x=0 y=0 w=400 h=300
///   a: x=10 y=20 w=50 h=40
///   c: x=0 y=0 w=10 h=10 (hidden)
/// warning: below(of: c) won't be applied, ...
/// ```
pub fn render_text(result: &LayoutResult) -> String {
    let mut out = format!("direction: {}\n", result.direction);
    for view in &result.views {
        out.push_str(&format!("{}{}: {}", "  ".repeat(view.depth), view.name, view.frame));
        if view.hidden {
            out.push_str(" (hidden)");
        }
        out.push('\n');
    }
    for message in &result.diagnostics {
        out.push_str(&format!("warning: {}\n", message));
    }
    out
}
