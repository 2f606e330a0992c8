// detail_fetcher.rs
use crate::config::{Settings, ID_COLUMN};
use crate::errors::PipelineError;
use crate::registry::RegistryApi;
use crate::store::{read_id_set, read_table, AppendOutcome, AppendTable};
use std::collections::HashSet;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetailSummary {
    pub attempted: usize,
    pub written: usize,
    pub failed: usize,
    pub dropped: usize,
}

/// Identifiers from the list file that are not yet in the detail file,
/// in list order, cut to `limit` (0 or `None` means no cut).
pub fn pending_codes(
    list_file: &Path,
    detail_file: &Path,
    limit: Option<usize>,
) -> Result<Vec<String>, PipelineError> {
    if !list_file.exists() {
        return Err(PipelineError::MissingInput(list_file.to_path_buf()));
    }
    let Some(list) = read_table(list_file)? else {
        return Ok(Vec::new());
    };

    let processed = read_id_set(detail_file, ID_COLUMN)?;

    let mut seen = HashSet::new();
    let mut pending: Vec<String> = list
        .column(list_file, ID_COLUMN)?
        .into_iter()
        .filter(|code| !code.is_empty() && !processed.contains(code))
        .filter(|code| seen.insert(code.clone()))
        .collect();

    if let Some(n) = limit.filter(|n| *n > 0) {
        if pending.len() > n {
            info!(limit = n, "limiting run");
            pending.truncate(n);
        }
    }

    Ok(pending)
}

/// Fetch details for every pending identifier and append them to the
/// detail file, one flushed row at a time.
///
/// A failed fetch is logged and skipped; it stays out of the skip-list and
/// gets another try on the next run. A record whose fields differ from the
/// file's header is dropped.
pub fn run_detail_fetch<A: RegistryApi + ?Sized>(
    api: &A,
    settings: &Settings,
    limit: Option<usize>,
) -> Result<DetailSummary, PipelineError> {
    let pending = pending_codes(&settings.list_file, &settings.detail_file, limit)?;
    let mut summary = DetailSummary::default();

    if pending.is_empty() {
        info!("all items in the list are already processed or the list is empty");
        return Ok(summary);
    }

    info!(count = pending.len(), "starting to fetch details");

    let mut table = AppendTable::open(&settings.detail_file)?;
    if let Some(header) = table.header() {
        info!(columns = header.len(), "appending under existing header");
    }
    let total = pending.len();

    for (i, code) in pending.iter().enumerate() {
        if i == 0 || (i + 1) % 10 == 0 {
            info!(n = i + 1, total, kapt_code = %code, "processing");
        }

        summary.attempted += 1;
        match api.detail(code) {
            Ok(record) => match table.append(&record)? {
                AppendOutcome::Written => summary.written += 1,
                AppendOutcome::SchemaMismatch => {
                    warn!(kapt_code = %code, "fields differ from file header; row dropped");
                    summary.dropped += 1;
                }
            },
            Err(e) => {
                error!(kapt_code = %code, error = %e, "error fetching detail");
                summary.failed += 1;
            }
        }

        std::thread::sleep(settings.detail_delay);
    }

    info!(
        written = summary.written,
        failed = summary.failed,
        dropped = summary.dropped,
        path = %settings.detail_file.display(),
        "finished fetching details"
    );
    Ok(summary)
}
