//! Pinframe CLI
//!
//! Usage:
//!   pinframe [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>        Layout configuration (TOML format)
//!   -d, --direction <DIR>      Layout direction: auto, ltr or rtl
//!   -f, --format <FORMAT>      Output format: text or svg
//!   -g, --grammar              Show script grammar reference
//!   -q, --quiet                Only log errors
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use pinframe::layout::LayoutDirection;
use pinframe::{run_with_config, LayoutConfig, OutputFormat, RunConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Svg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Svg => OutputFormat::Svg,
        }
    }
}

#[derive(Parser)]
#[command(name = "pinframe")]
#[command(about = "Lay out views by pinning their edges")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout direction, overriding the configuration file
    #[arg(short, long)]
    direction: Option<LayoutDirection>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show script grammar reference
    #[arg(short, long)]
    grammar: bool,

    /// Only log errors; "won't be applied" warnings still appear in the report
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let mut layout = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    if let Some(direction) = cli.direction {
        layout.direction = direction;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = RunConfig::new()
        .with_layout(layout)
        .with_format(cli.format.into());
    match run_with_config(&source, config) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Pinframe - lay out views by pinning their edges

USAGE:
    pinframe [OPTIONS] [FILE]
    echo '<script>' | pinframe

OPTIONS:
    -c, --config       Layout configuration (TOML file)
    -d, --direction    auto, ltr or rtl
    -f, --format       text (default) or svg
    -g, --grammar      Show script grammar reference
    -q, --quiet        Only log errors
    -h, --help         Print help

QUICK START:
    echo 'view root [width: 200, height: 100] {{ view a [width: 40, height: 20] view b [width: 60, height: 20] }}
          a.top(10).left(10)
          b.after(of: a, aligned: center).margin_left(8)' | pinframe

Run --grammar for the full syntax."#
    );
}

fn print_grammar() {
    println!(
        r#"PINFRAME SCRIPT GRAMMAR
=======================

VIEWS
-----
view NAME [modifiers] {{ children }}

Modifiers (all optional):
    x, y, width, height          Initial frame, in the parent's space
    content_width, content_height Size reported to size_to_fit
    hidden: true | false         Hidden views are skipped as references

DIRECTION
---------
direction auto | ltr | rtl       The last statement wins for the whole script

PIN CHAINS
----------
SUBJECT.call(args).call(args)    Calls apply in order, the frame is set once

Edges (value, parent edge, or another view's edge):
    top(10)  top()  top(to: a.bottom)
    left, h_center, right, start, end, top, v_center, bottom

Anchors:
    top_left(to: a.bottom_right)
    top_left, top_center, top_right, center_left, center, center_right,
    bottom_left, bottom_center, bottom_right, and *_start / *_end forms

Parent:
    all(inset)  horizontally(inset)  vertically(inset)  center_in_parent()

Size:
    width(n)  height(n)  size(w, h)  min_width(n)  max_width(n)
    min_height(n)  max_height(n)  size_to_fit(width | height |
    width_flexible | height_flexible)  wrap_content(all | width | height,
    padding: n)

Margins:
    margin_top, margin_left, margin_bottom, margin_right, margin_start,
    margin_end, margin_horizontal, margin_vertical (n)
    margin(n)  margin(top: n, left: n, bottom: n, right: n)

Relative (of: a view or a list of views):
    above(of: a, aligned: left | center | right | start | end)
    below(of: [a, b], aligned: .center)
    left_of(of: a, aligned: top | center | bottom)
    right_of, before, after (before/after follow the direction)

Hidden references are ignored; when none remain the call is skipped with a
"won't be applied" warning.

COMMENTS
--------
// line comment    /* block comment */"#
    );
}
