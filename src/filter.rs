//! View derivation from user-selected criteria.
//!
//! A view is a list of borrowed rows. [`FilterCriteria::apply`] accepts a
//! table or an existing view, so re-filtering a view is a no-op.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{ClientRecord, ClientType};
use crate::store::RecordTable;

/// Upper-bound margin added when every observed price is the same.
pub const DEGENERATE_SPAN_MARGIN: f64 = 100.0;
/// For large prices the margin grows to this share of the price, so the
/// widened bound stays above the low one.
pub const DEGENERATE_SPAN_RATIO: f64 = 0.1;

pub type View<'a> = Vec<&'a ClientRecord>;

/// Inclusive price interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }

    /// Fit a requested range inside `bounds`, the way a slider stays on its track.
    ///
    /// A NaN end snaps to the matching bound.
    #[must_use]
    pub fn clamped_to(&self, bounds: &PriceRange) -> Self {
        // f64::max/min ignore a NaN operand, f64::clamp would panic on it
        let low = self.low.max(bounds.low).min(bounds.high);
        let high = self.high.min(bounds.high).max(low);
        Self { low, high }
    }

    pub fn is_degenerate(&self) -> bool {
        self.high <= self.low
    }
}

/// Selectable price bounds for a table: observed min and max.
///
/// When all prices are equal (or there are none) the upper bound is pushed out
/// by [`DEGENERATE_SPAN_MARGIN`], or by [`DEGENERATE_SPAN_RATIO`] of the price
/// when that is larger, so the range is never a single point.
pub fn price_bounds(table: &RecordTable) -> PriceRange {
    let mut prices = table.iter().map(|r| r.price);
    let Some(first) = prices.next() else {
        return PriceRange::new(0.0, DEGENERATE_SPAN_MARGIN);
    };

    let (low, high) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    if high > low {
        PriceRange::new(low, high)
    } else {
        let margin = DEGENERATE_SPAN_MARGIN.max(low.abs() * DEGENERATE_SPAN_RATIO);
        PriceRange::new(low, low + margin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub client_types: BTreeSet<ClientType>,
    pub min_score: u16,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    /// All client types, any score, the full selectable price span.
    pub fn defaults_for(table: &RecordTable) -> Self {
        Self {
            client_types: ClientType::ALL.into_iter().collect(),
            min_score: 0,
            price_range: price_bounds(table),
        }
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        self.client_types.contains(&record.client_type)
            && record.credit_score >= self.min_score
            && self.price_range.contains(record.price)
    }

    /// Keep the rows that match, in their original order.
    pub fn apply<'a, I>(&self, rows: I) -> View<'a>
    where
        I: IntoIterator<Item = &'a ClientRecord>,
    {
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Shorthand for `criteria.apply(table)`.
pub fn filter<'a>(table: &'a RecordTable, criteria: &FilterCriteria) -> View<'a> {
    criteria.apply(table)
}
