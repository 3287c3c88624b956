use std::fs;
use std::path::Path;

use crate::model::context::{LineKind, RenderContext, RenderedLine, INDENT_BLANK, INDENT_PIPE};
use crate::model::entry::{EntryKind, FsEntry};

/// Line for one entry: inherited indent, branch glyph, then the name.
pub fn render_line(entry: &FsEntry, ctx: &RenderContext) -> RenderedLine {
    let kind = match entry.kind {
        EntryKind::Directory => LineKind::Directory,
        EntryKind::File => LineKind::File,
    };
    RenderedLine {
        prefix: format!("{}{}", ctx.indent_prefix, ctx.branch_glyph()),
        label: entry.display_name(),
        kind,
    }
}

/// Indent handed to the children of the entry rendered with `ctx`.
/// Depends on that entry's sibling position, not on the children's.
pub fn child_indent(ctx: &RenderContext) -> String {
    let token = if ctx.is_last { INDENT_BLANK } else { INDENT_PIPE };
    format!("{}{}", ctx.indent_prefix, token)
}

pub fn child_context(ctx: &RenderContext, is_last: bool) -> RenderContext {
    RenderContext::new(child_indent(ctx), is_last)
}

/// The root line carries no glyph and no indent.
pub fn root_line(label: impl Into<String>) -> RenderedLine {
    RenderedLine {
        prefix: String::new(),
        label: label.into(),
        kind: LineKind::Root,
    }
}

/// Display name of the root directory, with a trailing slash.
///
/// `.`, `..` and `/` have no final component of their own, so their canonical
/// form is consulted; failing that the path is shown as given.
pub fn root_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            fs::canonicalize(path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        });

    let mut label = name.unwrap_or_else(|| path.display().to_string());
    if !label.ends_with('/') {
        label.push('/');
    }
    label
}
