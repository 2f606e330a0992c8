mod detail_fetcher;
mod list_fetcher;

pub use detail_fetcher::{pending_codes, run_detail_fetch, DetailSummary};
pub use list_fetcher::{fetch_all_pages, run_list_fetch};
