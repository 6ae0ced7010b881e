//! Pinframe - fluent, edge-based view layout
//!
//! Views are positioned by pinning their edges to the parent, to edges and
//! anchors of other views, or relative to a list of views (`above`, `below`,
//! `before`, `after`, ...), with right-to-left support. The engine works on
//! any host implementing [`layout::ViewHost`]; this crate also ships a small
//! script language that declares a view tree and the pin chains to run on it.
//!
//! # Example
//!
//! ```rust
//! use pinframe::run;
//!
//! let report = run(r#"
//!     view root [width: 100, height: 50] {
//!         view a [width: 10, height: 10]
//!     }
//!     a.center_in_parent()
//! "#).unwrap();
//! assert!(report.contains("a: x=45 y=20 w=10 h=10"));
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod renderer;

pub use error::ParseError;
pub use layout::{LayoutConfig, LayoutError, LayoutResult};
pub use parser::{parse, Document};
pub use renderer::{render_svg, render_text, SvgConfig};

use thiserror::Error;

/// Errors that can occur while running a script
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while building or executing the layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RunError {
    /// Format every error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Layout(err) => err.format(source, filename),
        }
    }
}

/// What [`run_with_config`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented frame report
    #[default]
    Text,
    /// SVG drawing of the absolute frames
    Svg,
}

/// Configuration for a complete run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Output format
    pub format: OutputFormat,
}

impl RunConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Parse and lay out a script, returning the resolved frames
pub fn layout_source(source: &str, config: &LayoutConfig) -> Result<LayoutResult, RunError> {
    let doc = parse(source)?;
    let result = layout::compute(&doc, config)?;
    log::debug!(
        "laid out {} views, {} diagnostics",
        result.views.len(),
        result.diagnostics.len()
    );
    Ok(result)
}

/// Run a script with default configuration and return the text report
pub fn run(source: &str) -> Result<String, RunError> {
    run_with_config(source, RunConfig::default())
}

/// Run a script with custom configuration
///
/// # Example
///
/// ```rust
/// use pinframe::{run_with_config, LayoutConfig, OutputFormat, RunConfig, SvgConfig};
/// use pinframe::layout::LayoutDirection;
///
/// let config = RunConfig::new()
///     .with_layout(LayoutConfig::default().with_direction(LayoutDirection::Rtl))
///     .with_svg(SvgConfig::default().with_viewbox_padding(5.0))
///     .with_format(OutputFormat::Svg);
///
/// let svg = run_with_config("view root [width: 10, height: 10]", config).unwrap();
/// assert!(svg.contains(r#"viewBox="-5 -5 20 20""#));
/// ```
pub fn run_with_config(source: &str, config: RunConfig) -> Result<String, RunError> {
    let result = layout_source(source, &config.layout)?;
    Ok(match config.format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Svg => render_svg(&result, &config.svg),
    })
}
