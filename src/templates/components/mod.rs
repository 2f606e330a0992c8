use crate::domain::summary::Bucket;
use maud::{html, Markup};

pub mod card;
pub mod error;

pub use card::{card, metric};
pub use error::error_page;

/// Horizontal bars scaled to the largest bucket.
pub fn bar_chart(buckets: &[Bucket]) -> Markup {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    html! {
        @if buckets.is_empty() {
            p { "No data" }
        } @else {
            div class="bars" {
                @for b in buckets {
                    div class="bar-row" {
                        span title=(b.label) { (b.label) }
                        div { div class="bar" style=(format!("width: {}%;", b.count * 100 / max)) {} }
                        span { (b.count) }
                    }
                }
            }
        }
    }
}
