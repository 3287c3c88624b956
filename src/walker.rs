use std::io::Write;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::lister::EntryLister;
use crate::error::{Result, TreeError};
use crate::model::context::RenderContext;
use crate::model::entry::FsEntry;
use crate::ui::renderer::{child_context, render_line, root_label, root_line};
use crate::ui::theme::Palette;

/// What to do when a directory below the root cannot be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    /// Directories whose listing failed under `OnError::Skip`.
    pub skipped: usize,
    /// Directories not entered because they resolve to an ancestor.
    pub cycles: usize,
}

/// One directory being iterated: its remaining children and the context they share.
struct Frame {
    children: Peekable<IntoIter<FsEntry>>,
    ctx: RenderContext,
    identity: Option<PathBuf>,
}

impl Frame {
    fn new(children: Vec<FsEntry>, ctx: RenderContext, identity: Option<PathBuf>) -> Self {
        Self {
            children: children.into_iter().peekable(),
            ctx,
            identity,
        }
    }
}

/// Fails with the matching error kind unless `path` is an existing directory.
pub fn validate_root(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TreeError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(TreeError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Depth-first, pre-order tree printer.
///
/// Traversal keeps an explicit stack of frames, so depth is bounded by memory
/// rather than by the call stack. Every line is written the moment it is
/// produced; on failure, whatever was written stays written.
pub struct Walker<'a, L: EntryLister> {
    lister: &'a L,
    palette: Palette,
    on_error: OnError,
}

impl<'a, L: EntryLister> Walker<'a, L> {
    pub fn new(lister: &'a L) -> Self {
        Self {
            lister,
            palette: Palette::plain(),
            on_error: OnError::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Validate `root`, then print it and everything below it.
    pub fn render_tree<W: Write>(&self, root: &Path, out: &mut W) -> Result<WalkSummary> {
        validate_root(root)?;
        self.walk(root, &root_label(root), out)
    }

    /// Print the tree under an already validated directory, labelled `label`.
    pub fn walk<W: Write>(&self, root: &Path, label: &str, out: &mut W) -> Result<WalkSummary> {
        let result = self.stream(root, label, out);
        let flushed = out.flush();
        let summary = result?;
        flushed?;

        debug!(
            root = %root.display(),
            directories = summary.directories,
            files = summary.files,
            skipped = summary.skipped,
            cycles = summary.cycles,
            "walk complete"
        );
        Ok(summary)
    }

    fn stream<W: Write>(&self, root: &Path, label: &str, out: &mut W) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();

        writeln!(out, "{}", self.palette.paint(&root_line(label)))?;
        let children = self.lister.list(root)?;
        let mut stack = vec![Frame::new(
            children,
            RenderContext::default(),
            self.lister.identity(root),
        )];

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.children.next() else {
                stack.pop();
                continue;
            };
            let ctx = frame.ctx.at(frame.children.peek().is_none());
            writeln!(out, "{}", self.palette.paint(&render_line(&entry, &ctx)))?;

            if !entry.is_dir() {
                summary.files += 1;
                continue;
            }
            summary.directories += 1;

            let identity = self.lister.identity(&entry.path);
            if identity.is_some() && stack.iter().any(|f| f.identity == identity) {
                warn!(path = %entry.path.display(), "not descending, directory loops back to an ancestor");
                summary.cycles += 1;
                continue;
            }

            let children = match self.lister.list(&entry.path) {
                Ok(children) => children,
                Err(TreeError::Enumeration { path, source }) if self.on_error == OnError::Skip => {
                    warn!(path = %path.display(), error = %source, "skipping unreadable directory");
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            debug!(path = %entry.path.display(), children = children.len(), "descending");
            stack.push(Frame::new(children, child_context(&ctx, false), identity));
        }

        Ok(summary)
    }
}
