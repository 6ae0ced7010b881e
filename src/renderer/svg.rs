//! SVG generation from layout results

use crate::layout::{LayoutResult, Rect, ViewLayout};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the default look for views, hidden views and labels
    pub fn add_default_styles(&mut self) {
        let p = self.prefix();
        self.styles.push(format!(
            ".{p}view {{ fill: none; stroke: #4a6fa5; stroke-width: 1; }} \
             .{p}hidden {{ stroke: #9a9a9a; stroke-dasharray: 4 2; }} \
             .{p}label {{ font: 10px sans-serif; fill: #333; }}"
        ));
    }

    /// Add the rectangle of one view
    pub fn add_view_rect(&mut self, name: &str, frame: Rect, hidden: bool) {
        let prefix = self.prefix();
        let mut classes = vec![format!("{}view", prefix)];
        if hidden {
            classes.push(format!("{}hidden", prefix));
        }

        self.elements.push(format!(
            r#"{}<rect id="{}" class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            escape_xml(name),
            classes.join(" "),
            frame.x,
            frame.y,
            frame.width,
            frame.height
        ));
    }

    /// Add a text label
    pub fn add_label(&mut self, text: &str, x: f64, y: f64) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            escape_xml(text)
        ));
    }

    /// Add a group element with an id
    pub fn start_group(&mut self, id: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<g id="{}-children" class="{}children">"#,
            self.indent_str(),
            escape_xml(id),
            prefix
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a LayoutResult to an SVG string.
///
/// Views are drawn at their absolute frames; children of a view are wrapped
/// in a `<g>` so the output keeps the hierarchy.
pub fn render_svg(result: &LayoutResult, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_default_styles();

    let mut open_groups = 0usize;
    for (i, view) in result.views.iter().enumerate() {
        while open_groups > view.depth {
            builder.end_group();
            open_groups -= 1;
        }

        render_view(view, config, &mut builder);

        let has_children = result
            .views
            .get(i + 1)
            .is_some_and(|next| next.depth > view.depth);
        if has_children {
            builder.start_group(&view.name);
            open_groups += 1;
        }
    }
    while open_groups > 0 {
        builder.end_group();
        open_groups -= 1;
    }

    builder.build(result.bounds())
}

fn render_view(view: &ViewLayout, config: &SvgConfig, builder: &mut SvgBuilder) {
    if view.hidden && !config.show_hidden {
        return;
    }
    builder.add_view_rect(&view.name, view.absolute, view.hidden);
    if config.labels {
        builder.add_label(&view.name, view.absolute.x + 3.0, view.absolute.y + 11.0);
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
