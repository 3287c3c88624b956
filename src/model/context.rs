/// One indent level for children of a last sibling.
pub const INDENT_BLANK: &str = "    ";
/// One indent level for children of a sibling that has siblings below it.
pub const INDENT_PIPE: &str = "│   ";

pub const BRANCH_MIDDLE: &str = "├── ";
pub const BRANCH_LAST: &str = "└── ";

/// Rendering state for one entry: the indent inherited from its ancestors
/// and whether it is the final entry of its parent's listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub indent_prefix: String,
    pub is_last: bool,
}

impl RenderContext {
    pub fn new(indent_prefix: impl Into<String>, is_last: bool) -> Self {
        Self {
            indent_prefix: indent_prefix.into(),
            is_last,
        }
    }

    /// Same indent, different sibling position.
    pub fn at(&self, is_last: bool) -> Self {
        Self {
            indent_prefix: self.indent_prefix.clone(),
            is_last,
        }
    }

    pub fn branch_glyph(&self) -> &'static str {
        if self.is_last {
            BRANCH_LAST
        } else {
            BRANCH_MIDDLE
        }
    }
}

/// Semantic category of an output line, consumed by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Root,
    Directory,
    File,
}

/// Uncolored structure of one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Indent plus branch glyph; empty for the root line.
    pub prefix: String,
    pub label: String,
    pub kind: LineKind,
}

impl RenderedLine {
    pub fn plain(&self) -> String {
        format!("{}{}", self.prefix, self.label)
    }
}
