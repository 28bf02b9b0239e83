//! Coordinating module for the note synchronisation pipeline.
//!
//! Walks a vault subtree depth-first, composes one payload per markdown
//! note, and drives the uploader over the notes strictly sequentially. A
//! failing note is recorded and never stops the rest of the batch.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Settings;
use crate::notify::Notifier;
use crate::payload::build_payload;
use crate::upload::{ArticleUploader, UploadError};
use crate::vault::{Note, Vault, VaultEntry};

/// Traversal refuses trees nested deeper than this. The vault is acyclic by
/// construction, so only pathological inputs trip it.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read note {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to list vault folder {path}: {source}")]
    Walk {
        path: String,
        source: std::io::Error,
    },
    #[error("vault folder nesting exceeds {} levels", MAX_DEPTH)]
    TooDeep,
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// One recorded per-note failure, in discovery order.
#[derive(Debug)]
pub struct BatchFailure {
    pub path: String,
    pub error: String,
}

/// Aggregate result of one batch invocation.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<BatchFailure>,
}

/// Syncs a single note and surfaces its outcome to the notifier. Failures
/// propagate to the caller.
pub async fn sync_note(
    vault: &dyn Vault,
    uploader: &dyn ArticleUploader,
    notifier: &dyn Notifier,
    settings: &Settings,
    note: &Note,
    override_path: Option<&str>,
) -> Result<String, SyncError> {
    match upload_one(vault, uploader, settings, note, override_path).await {
        Ok(destination) => {
            notifier.notify(&format!("Synced: {destination}"));
            Ok(destination)
        }
        Err(error) => {
            notifier.notify(&format!("Sync failed for {}: {error}", note.path));
            Err(error)
        }
    }
}

/// Syncs every markdown note under `root`, sequentially in discovery order.
///
/// Per-note failures are caught and recorded in the report; only walk errors
/// (unreadable folders, excessive nesting) abort the batch. With `silent`
/// set, per-note notifications are suppressed; the aggregate one is not.
pub async fn sync_tree(
    vault: &dyn Vault,
    uploader: &dyn ArticleUploader,
    notifier: &dyn Notifier,
    settings: &Settings,
    root: &VaultEntry,
    silent: bool,
) -> Result<BatchReport, SyncError> {
    let notes = collect_notes(vault, root)?;
    if notes.is_empty() {
        info!("No markdown notes under sync root");
        notifier.notify("No markdown notes found");
        return Ok(BatchReport::default());
    }

    info!(count = notes.len(), "Starting batch sync");
    let mut report = BatchReport::default();
    for note in &notes {
        match upload_one(vault, uploader, settings, note, None).await {
            Ok(destination) => {
                report.success_count += 1;
                if !silent {
                    notifier.notify(&format!("Synced: {destination}"));
                }
            }
            Err(error) => {
                report.failure_count += 1;
                warn!(path = %note.path, error = %error, "Note sync failed, continuing batch");
                if !silent {
                    notifier.notify(&format!("Sync failed for {}: {error}", note.path));
                }
                report.failures.push(BatchFailure {
                    path: note.path.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = report.success_count,
        failed = report.failure_count,
        "Batch sync finished"
    );
    notifier.notify(&format!(
        "{} succeeded, {} failed",
        report.success_count, report.failure_count
    ));
    Ok(report)
}

/// Reads, composes, and uploads one note.
async fn upload_one(
    vault: &dyn Vault,
    uploader: &dyn ArticleUploader,
    settings: &Settings,
    note: &Note,
    override_path: Option<&str>,
) -> Result<String, SyncError> {
    let content = vault.read_note(&note.path).map_err(|source| SyncError::Read {
        path: note.path.clone(),
        source,
    })?;
    let payload = build_payload(
        note,
        &content,
        settings.default_path.as_deref(),
        override_path,
    );
    Ok(uploader.sync_article(payload).await?)
}

/// Depth-first collection of eligible notes, in the order the vault reports
/// children. Non-markdown files are skipped.
fn collect_notes(vault: &dyn Vault, root: &VaultEntry) -> Result<Vec<Note>, SyncError> {
    fn visit(
        vault: &dyn Vault,
        entry: &VaultEntry,
        depth: usize,
        out: &mut Vec<Note>,
    ) -> Result<(), SyncError> {
        if depth > MAX_DEPTH {
            return Err(SyncError::TooDeep);
        }
        match entry {
            VaultEntry::Note(note) if note.is_markdown() => out.push(note.clone()),
            VaultEntry::Note(_) => {}
            VaultEntry::Folder { path } => {
                let children = vault
                    .list_children(path)
                    .map_err(|source| SyncError::Walk {
                        path: path.clone(),
                        source,
                    })?;
                for child in &children {
                    visit(vault, child, depth + 1, out)?;
                }
            }
        }
        Ok(())
    }

    let mut notes = Vec::new();
    visit(vault, root, 0, &mut notes)?;
    Ok(notes)
}
