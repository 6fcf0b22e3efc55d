//! Summary metrics and chart groupings over a view.
//!
//! Everything here is a pure function of the rows passed in and is
//! recomputed on each render.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ClientRecord, ClientType, DriverOption};

/// Dashboard figures for one view.
///
/// Averages are `None` for an empty view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub average_price: Option<f64>,
    pub average_score: Option<f64>,
    pub returning_clients: usize,
    pub by_client_type: BTreeMap<ClientType, usize>,
    pub by_driver: Vec<DriverShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverShare {
    pub option: DriverOption,
    pub count: usize,
    pub percent: f64,
}

pub fn summarize(view: &[&ClientRecord]) -> Summary {
    let by_client_type = count_by_client_type(view);
    Summary {
        count: view.len(),
        average_price: average_price(view),
        average_score: average_score(view),
        returning_clients: by_client_type
            .get(&ClientType::Returning)
            .copied()
            .unwrap_or(0),
        by_client_type,
        by_driver: driver_split(view),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

pub fn average_price(view: &[&ClientRecord]) -> Option<f64> {
    mean(view.iter().map(|r| r.price))
}

pub fn average_score(view: &[&ClientRecord]) -> Option<f64> {
    mean(view.iter().map(|r| f64::from(r.credit_score)))
}

/// Row count per client type. Types with no rows are left out.
pub fn count_by_client_type(view: &[&ClientRecord]) -> BTreeMap<ClientType, usize> {
    let mut counts = BTreeMap::new();
    for r in view {
        *counts.entry(r.client_type).or_insert(0) += 1;
    }
    counts
}

/// Row count per driver option, in [`DriverOption::ALL`] order. Options with
/// no rows are left out.
pub fn count_by_driver(view: &[&ClientRecord]) -> Vec<(DriverOption, usize)> {
    DriverOption::ALL
        .into_iter()
        .map(|opt| (opt, view.iter().filter(|r| r.has_driver == opt).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

fn driver_split(view: &[&ClientRecord]) -> Vec<DriverShare> {
    let total = view.len();
    count_by_driver(view)
        .into_iter()
        .map(|(option, count)| DriverShare {
            option,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

/// One equal-width price bucket with per-type counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub low: f64,
    pub high: f64,
    pub counts: BTreeMap<ClientType, usize>,
}

impl HistogramBin {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Price distribution split by client type.
///
/// Bins span the view's observed prices. A view where every price is equal
/// gets a single bin; an empty view gets none.
pub fn price_histogram(view: &[&ClientRecord], bins: usize) -> Vec<HistogramBin> {
    let Some(first) = view.first() else {
        return Vec::new();
    };
    let (low, high) = view
        .iter()
        .fold((first.price, first.price), |(lo, hi), r| (lo.min(r.price), hi.max(r.price)));

    let bins = if high > low { bins.max(1) } else { 1 };
    let width = (high - low) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            low: low + width * i as f64,
            high: if i + 1 == bins { high } else { low + width * (i + 1) as f64 },
            counts: BTreeMap::new(),
        })
        .collect();

    for r in view {
        let idx = if width > 0.0 {
            (((r.price - low) / width) as usize).min(bins - 1)
        } else {
            0
        };
        *out[idx].counts.entry(r.client_type).or_insert(0) += 1;
    }
    out
}
