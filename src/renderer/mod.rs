//! Output for layout results
//!
//! [`render_text`] prints one line per view frame; [`render_svg`] draws the
//! absolute frames with CSS classes for styling.

pub mod config;
pub mod svg;
pub mod text;

pub use config::SvgConfig;
pub use svg::render_svg;
pub use text::render_text;
