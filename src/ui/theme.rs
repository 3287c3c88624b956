use std::io;

use crossterm::style::{Attribute, Color, ContentStyle};
use crossterm::tty::IsTty;
use serde::Deserialize;

use crate::model::context::{LineKind, RenderedLine};

/// When to emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn resolve(self) -> bool {
        self.enabled(io::stdout().is_tty(), std::env::var_os("NO_COLOR").is_some())
    }

    fn enabled(self, is_tty: bool, no_color: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_tty && !no_color,
        }
    }
}

fn style(fg: Color, bold: bool) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = Some(fg);
    if bold {
        style.attributes.set(Attribute::Bold);
    }
    style
}

pub fn root_style() -> ContentStyle {
    style(Color::Blue, true)
}

pub fn dir_style() -> ContentStyle {
    style(Color::Blue, true)
}

pub fn file_style() -> ContentStyle {
    style(Color::Green, false)
}

/// Maps line categories to terminal styles. Indent and glyphs stay unstyled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, line: &RenderedLine) -> String {
        if !self.enabled {
            return line.plain();
        }
        let style = match line.kind {
            LineKind::Root => root_style(),
            LineKind::Directory => dir_style(),
            LineKind::File => file_style(),
        };
        format!("{}{}", line.prefix, style.apply(line.label.as_str()))
    }
}
