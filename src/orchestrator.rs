//! Submission orchestration: one connection, every enabled import kind.

use crate::api::{ImportApi, JobHandle, request};
use crate::error::SyncError;
use crate::logger::{Level, Logger};
use crate::records::{self, ImportKind, RecordBatch};
use crate::source::RecordSource;

/// One accepted submission: the kind and the handle the platform returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: ImportKind,
    pub handle: JobHandle,
}

/// Fetches, builds and submits one batch per enabled kind, in the fixed
/// Department → CostCenter → Employee → Absence order.
///
/// In dry-run mode each batch is printed instead of submitted: no remote
/// call is made and no handle is produced. Empty batches are submitted like
/// any other. A failing adapter or submission aborts the remaining kinds of
/// this connection.
pub async fn submit_all(
    api: &impl ImportApi,
    source: &dyn RecordSource,
    log: &Logger,
    organization_id: &str,
    kinds: &[ImportKind],
    dry_run: bool,
) -> Result<Vec<Submission>, SyncError> {
    let mut submissions = Vec::new();

    for &kind in kinds {
        let batch = fetch(source, kind)?;
        let count = batch.as_array().map_or(0, Vec::len);

        if dry_run {
            log.write(Level::Info, &format!("{count} {kind}:"));
            println!("{}", serde_json::to_string_pretty(&batch)?);
            continue;
        }

        log.write(Level::Notice, &format!("Importing {count} {kind}..."));
        let document = request::build(kind, organization_id, &batch);
        let handle = api.submit(&document).await?;
        submissions.push(Submission { kind, handle });
    }

    Ok(submissions)
}

/// Dispatches to the adapter capability matching the kind and erases the
/// batch to its opaque wire form.
fn fetch(source: &dyn RecordSource, kind: ImportKind) -> Result<RecordBatch, SyncError> {
    let batch = match kind {
        ImportKind::Department => records::to_batch(&source.departments()?)?,
        ImportKind::CostCenter => records::to_batch(&source.cost_centers()?)?,
        ImportKind::Employee => records::to_batch(&source.personnel()?)?,
        ImportKind::Absence => records::to_batch(&source.absences()?)?,
    };
    Ok(batch)
}
