// src/domain/summary.rs

use crate::domain::apartment::Apartment;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_YEAR_FROM: i32 = 1980;
pub const DEFAULT_YEAR_TO: i32 = 2025;
pub const FLOOR_BINS: usize = 30;
pub const TOP_BUILDERS: usize = 20;

/// Dashboard filter state, as read from the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Empty means every district.
    pub districts: Vec<String>,
    pub year_from: i32,
    pub year_to: i32,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            districts: Vec::new(),
            year_from: DEFAULT_YEAR_FROM,
            year_to: DEFAULT_YEAR_TO,
        }
    }
}

impl Filter {
    /// Rows without a built year never pass the year range.
    pub fn matches(&self, apt: &Apartment) -> bool {
        let district_ok = self.districts.is_empty() || self.districts.contains(&apt.district);
        let year_ok = apt
            .built_year
            .map(|y| y >= self.year_from && y <= self.year_to)
            .unwrap_or(false);
        district_ok && year_ok
    }

    pub fn apply<'a>(&self, apartments: &'a [Apartment]) -> Vec<&'a Apartment> {
        apartments.iter().filter(|a| self.matches(a)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub count: usize,
    pub mean_households: i64,
    pub mean_top_floor: i64,
    pub top_builder: Option<String>,
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Everything the dashboard page shows for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub metrics: Metrics,
    pub by_type: Vec<Bucket>,
    pub by_year: Vec<Bucket>,
    pub by_heating: Vec<Bucket>,
    pub floor_histogram: Vec<Bucket>,
    pub top_builders: Vec<Bucket>,
}

impl Summary {
    pub fn build(rows: &[&Apartment]) -> Self {
        let builders = value_counts(rows.iter().map(|a| a.builder.as_str()));

        Summary {
            metrics: Metrics {
                count: rows.len(),
                mean_households: mean(rows.iter().map(|a| a.households)),
                mean_top_floor: mean(rows.iter().map(|a| a.top_floor)),
                top_builder: builders.first().map(|b| b.label.clone()),
            },
            by_type: value_counts(rows.iter().map(|a| a.apt_type.as_str())),
            by_year: year_counts(rows),
            by_heating: value_counts(rows.iter().map(|a| a.heating.as_str())),
            floor_histogram: histogram(rows.iter().map(|a| a.top_floor), FLOOR_BINS),
            top_builders: builders.into_iter().take(TOP_BUILDERS).collect(),
        }
    }
}

/// Truncated mean; 0 for no rows.
fn mean(values: impl Iterator<Item = f64>) -> i64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0
    } else {
        (sum / n as f64) as i64
    }
}

/// Count non-empty labels; most frequent first, ties by label.
pub fn value_counts<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<Bucket> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels.filter(|l| !l.trim().is_empty()) {
        *counts.entry(label).or_default() += 1;
    }

    let mut out: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket {
            label: label.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

fn year_counts(rows: &[&Apartment]) -> Vec<Bucket> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in rows.iter().filter_map(|a| a.built_year) {
        *counts.entry(year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| Bucket {
            label: year.to_string(),
            count,
        })
        .collect()
}

/// Equal-width bins between min and max. A single distinct value gets one bin.
pub fn histogram(values: impl Iterator<Item = f64>, bins: usize) -> Vec<Bucket> {
    let values: Vec<f64> = values.collect();
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    if bins == 0 || max <= min {
        return vec![Bucket {
            label: format!("{min}"),
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + width * i as f64;
            let hi = lo + width;
            Bucket {
                label: format!("{lo:.0}–{hi:.0}"),
                count,
            }
        })
        .collect()
}
