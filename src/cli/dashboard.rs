use anyhow::Result;
use std::fmt::Write;

use crate::cli::ui::format_money;
use crate::cli::DashboardArgs;
use crate::filter::FilterCriteria;
use crate::models::ClientType;
use crate::report::{price_histogram, summarize, HistogramBin, Summary};
use crate::store::RecordStore;

const HISTOGRAM_BINS: usize = 8;
const BAR_WIDTH: usize = 40;

/// Execute the dashboard command
pub fn run_dashboard(store: &RecordStore, args: &DashboardArgs) -> Result<()> {
    let criteria = args.filters.criteria(store.table());
    if args.json {
        let view = criteria.apply(store.table());
        println!("{}", serde_json::to_string_pretty(&summarize(&view))?);
        return Ok(());
    }
    print!("{}", render_dashboard(store, &criteria));
    Ok(())
}

/// Full dashboard text for the current table and criteria.
pub fn render_dashboard(store: &RecordStore, criteria: &FilterCriteria) -> String {
    if store.table().is_empty() {
        return "No client data yet. Use `rentalcrm add` to register the first client.\n".to_string();
    }

    let view = criteria.apply(store.table());
    let summary = summarize(&view);

    let mut out = String::new();
    let _ = writeln!(out, "Client dashboard ({} of {} records)\n", view.len(), store.table().len());
    out.push_str(&render_metrics(&summary));
    if view.is_empty() {
        out.push_str("\nNo records match the current filters.\n");
        return out;
    }
    out.push('\n');
    out.push_str(&render_histogram(&price_histogram(&view, HISTOGRAM_BINS)));
    out.push('\n');
    out.push_str(&render_type_counts(&summary));
    out.push('\n');
    out.push_str(&render_driver_split(&summary));
    out
}

fn render_metrics(summary: &Summary) -> String {
    let average_price = summary
        .average_price
        .map(format_money)
        .unwrap_or_else(|| "n/a".to_string());
    let average_score = summary
        .average_score
        .map(|s| format!("{:.0}", s))
        .unwrap_or_else(|| "n/a".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "  {:<20}{}", "Clients", summary.count);
    let _ = writeln!(out, "  {:<20}{}", "Average price", average_price);
    let _ = writeln!(out, "  {:<20}{}", "Average score", average_score);
    let _ = writeln!(out, "  {:<20}{}", "Returning clients", summary.returning_clients);
    out
}

fn type_glyph(client_type: ClientType) -> char {
    match client_type {
        ClientType::New => '█',
        ClientType::Returning => '▒',
    }
}

fn bar(len: usize, glyph: char) -> String {
    std::iter::repeat(glyph).take(len).collect()
}

/// Scale `n` against `max` into at most BAR_WIDTH cells, keeping non-zero visible.
fn scaled(n: usize, max: usize) -> usize {
    if n == 0 || max == 0 {
        return 0;
    }
    (n * BAR_WIDTH / max).max(1)
}

fn render_histogram(bins: &[HistogramBin]) -> String {
    let mut out = String::from("PRICE DISTRIBUTION  (█ new  ▒ returning)\n");
    let max = bins.iter().map(HistogramBin::total).max().unwrap_or(0);

    for b in bins {
        let range = format!("{} - {}", format_money(b.low), format_money(b.high));
        let mut bars = String::new();
        for t in ClientType::ALL {
            let n = b.counts.get(&t).copied().unwrap_or(0);
            bars.push_str(&bar(scaled(n, max), type_glyph(t)));
        }
        let _ = writeln!(out, "  {:<25} {} {}", range, bars, b.total());
    }
    out
}

fn render_type_counts(summary: &Summary) -> String {
    let mut out = String::from("CLIENTS BY TYPE\n");
    let max = summary.by_client_type.values().copied().max().unwrap_or(0);
    for t in ClientType::ALL {
        let n = summary.by_client_type.get(&t).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<12}{} {}", t.as_str(), bar(scaled(n, max), type_glyph(t)), n);
    }
    out
}

fn render_driver_split(summary: &Summary) -> String {
    let mut out = String::from("WITH / WITHOUT DRIVER\n");
    for share in &summary.by_driver {
        let _ = writeln!(
            out,
            "  {:<16}{:>4}  {:>5.1}%",
            share.option.label(),
            share.count,
            share.percent
        );
    }
    out
}
