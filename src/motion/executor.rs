//! Applying a motion to every cursor
//!
//! The executor resolves the text object around each cursor against one
//! snapshot, then performs the operation with a single host call: one edit
//! batch for delete, one clipboard write for yank, one selection update for
//! select. Cursors that resolve to nothing are skipped individually.

use super::request::{MotionRequest, Operation};
use crate::app::editor::operations::{self, TextEdit};
use crate::app::editor::{Range, ResolveError, Resolver, ResolverOptions};
use crate::host::{EditorHost, HighlightStyle, Selection};
use rust_i18n::t;
use std::time::Duration;
use thiserror::Error;

/// Default lifetime of the yank highlight
pub const DEFAULT_HIGHLIGHT_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("no active editor")]
    NoActiveCursor,
    #[error("no text object for '{trigger}' at any cursor: {reason}")]
    NothingResolved { trigger: char, reason: ResolveError },
    #[error("the editor rejected the edit")]
    EditRejected,
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

/// What a motion did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReport {
    pub operation: Operation,
    /// Cursors whose text object was acted on
    pub applied: usize,
    /// Cursors with no text object
    pub skipped: usize,
    /// Text written to the clipboard by a yank
    pub yanked: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MotionExecutor {
    resolver: Resolver,
    highlight_timeout: Duration,
}

impl Default for MotionExecutor {
    fn default() -> Self {
        Self::new(ResolverOptions::default(), DEFAULT_HIGHLIGHT_TIMEOUT)
    }
}

impl MotionExecutor {
    pub fn new(options: ResolverOptions, highlight_timeout: Duration) -> Self {
        Self {
            resolver: Resolver::new(options),
            highlight_timeout,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve `request` at every cursor of the host and apply it
    pub async fn execute<H>(
        &self,
        host: &mut H,
        request: &MotionRequest,
    ) -> Result<ExecutionReport, MotionError>
    where
        H: EditorHost + ?Sized,
    {
        let Some(snapshot) = host.snapshot().filter(|s| !s.selections.is_empty()) else {
            host.print_output(&t!("motion.no_editor"), true);
            return Err(MotionError::NoActiveCursor);
        };
        let doc = &snapshot.document;

        let mut ranges: Vec<Range> = Vec::with_capacity(snapshot.selections.len());
        let mut last_error = ResolveError::NotFound;
        for (index, selection) in snapshot.selections.iter().enumerate() {
            let offset = doc.offset_of(selection.head);
            match self.resolver.resolve(doc, offset, request.trigger, request.count) {
                Ok(found) => ranges.push(found.range(request.scope)),
                Err(e) => {
                    tracing::debug!(
                        cursor = index,
                        %offset,
                        motion = %request,
                        error = %e,
                        "cursor skipped"
                    );
                    last_error = e;
                }
            }
        }

        let skipped = snapshot.selections.len() - ranges.len();
        if ranges.is_empty() {
            let message = match last_error {
                ResolveError::InvalidTrigger(c) => t!("motion.invalid_trigger", trigger = c),
                ResolveError::NotFound => t!("motion.not_found", motion = request),
            };
            host.print_output(&message, true);
            return Err(MotionError::NothingResolved {
                trigger: request.trigger,
                reason: last_error,
            });
        }

        let report = match request.operation {
            Operation::Delete => {
                let mut edits: Vec<TextEdit> = ranges
                    .iter()
                    .map(|range| TextEdit::delete(doc.span_of(*range)))
                    .collect();
                // Cursors inside the same pair resolve to the same span
                edits.sort_by_key(|edit| edit.span);
                edits.dedup();
                operations::sort_descending(&mut edits);
                let applied = edits.len();

                if !host.apply_edits(edits).await? {
                    tracing::warn!(motion = %request, "delete rejected by editor");
                    host.print_output(&t!("motion.edit_rejected"), true);
                    return Err(MotionError::EditRejected);
                }
                host.print_output(&t!("motion.deleted", count = applied), false);
                ExecutionReport {
                    operation: request.operation,
                    applied,
                    skipped,
                    yanked: None,
                }
            }
            Operation::Yank => {
                let text = ranges
                    .iter()
                    .map(|range| doc.slice(doc.span_of(*range)))
                    .collect::<Vec<_>>()
                    .join("\n");
                host.write_clipboard(text.clone()).await?;

                let mut handle = host.highlight(ranges.clone(), HighlightStyle::Yank);
                let timeout = self.highlight_timeout;
                tokio::spawn(async move {
                    tokio::time::sleep(timeout).await;
                    handle.dispose();
                });

                host.print_output(&t!("motion.yanked", count = ranges.len()), false);
                ExecutionReport {
                    operation: request.operation,
                    applied: ranges.len(),
                    skipped,
                    yanked: Some(text),
                }
            }
            Operation::Select => {
                let selections: Vec<Selection> = ranges
                    .iter()
                    .map(|range| Selection::new(range.start, range.end))
                    .collect();
                host.set_selections(selections);
                host.print_output(&t!("motion.selected", count = ranges.len()), false);
                ExecutionReport {
                    operation: request.operation,
                    applied: ranges.len(),
                    skipped,
                    yanked: None,
                }
            }
        };

        tracing::info!(
            motion = %request,
            applied = report.applied,
            skipped = report.skipped,
            "motion executed"
        );
        Ok(report)
    }
}
