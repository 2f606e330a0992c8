// list_fetcher.rs
use crate::config::Settings;
use crate::errors::PipelineError;
use crate::registry::{RegistryApi, Record};
use crate::store::write_records;
use std::time::Duration;
use tracing::{error, info, warn};

/// Walk the list endpoint from page 1 until `totalCount` rows are in hand
/// or a page comes back empty or fails. Never retries.
///
/// The result holds at most `totalCount` records.
pub fn fetch_all_pages<A: RegistryApi + ?Sized>(
    api: &A,
    page_size: u32,
    delay: Duration,
) -> Vec<Record> {
    let mut page_no = 1;

    let first = match api.list_page(page_no, page_size) {
        Ok(page) => page,
        Err(e) => {
            error!(page = page_no, error = %e, "failed to fetch the initial data");
            return Vec::new();
        }
    };

    let total = usize::try_from(first.total_count).unwrap_or(usize::MAX);
    info!(total, "total apartments to fetch");

    let mut all = first.items;

    while all.len() < total {
        std::thread::sleep(delay);
        page_no += 1;
        info!(page = page_no, fetched = all.len(), total, "fetching page");

        let items = match api.list_page(page_no, page_size) {
            Ok(page) => page.items,
            Err(e) => {
                error!(page = page_no, error = %e, "page fetch failed, stopping");
                break;
            }
        };

        if items.is_empty() {
            warn!(page = page_no, "empty page before reaching total, stopping");
            break;
        }

        all.extend(items);
    }

    all.truncate(total);
    info!(fetched = all.len(), "list fetch finished");
    all
}

/// Fetch the whole list and overwrite the list file with it.
/// Returns the number of rows written; zero rows means no file was touched.
pub fn run_list_fetch<A: RegistryApi + ?Sized>(
    api: &A,
    settings: &Settings,
) -> Result<usize, PipelineError> {
    info!("starting apartment list crawl");

    let records = fetch_all_pages(api, settings.page_size, settings.list_delay);
    if records.is_empty() {
        warn!("no data to save");
        return Ok(0);
    }

    let written = write_records(&settings.list_file, &records)?;
    info!(rows = written, path = %settings.list_file.display(), "list saved");
    Ok(written)
}
