use anyhow::Result;
use std::fmt::Write;

use crate::cli::ui::{term_width, truncate};
use crate::cli::ListArgs;
use crate::filter::FilterCriteria;
use crate::models::{ClientRecord, COLUMNS};
use crate::store::{sort_by_date_desc, RecordStore};

/// Execute the list command
pub fn run_list(store: &RecordStore, args: &ListArgs) -> Result<()> {
    let criteria = args.filters.criteria(store.table());
    print!("{}", render_list(store, &criteria, term_width()));
    Ok(())
}

/// Data table for the filtered view, newest service first.
pub fn render_list(store: &RecordStore, criteria: &FilterCriteria, width: usize) -> String {
    if store.table().is_empty() {
        return "No clients.\n".to_string();
    }

    let mut view = criteria.apply(store.table());
    sort_by_date_desc(&mut view);

    let mut out = String::new();
    let _ = writeln!(out, "Clients ({} of {})\n", view.len(), store.table().len());
    let layout = ColumnLayout::for_width(width);
    out.push_str(&layout.header());
    for record in view {
        out.push_str(&layout.row(record));
    }
    out
}

/// Which columns to show and how wide, by terminal width.
struct ColumnLayout {
    /// (index into COLUMNS, width)
    columns: Vec<(usize, usize)>,
}

impl ColumnLayout {
    fn for_width(width: usize) -> Self {
        let columns = if width >= 190 {
            // Everything
            vec![
                (0, 10), (1, 22), (2, 12), (3, 13), (4, 14), (5, 10),
                (6, 18), (7, 22), (8, 14), (9, 12), (10, 12), (11, 9),
            ]
        } else if width >= 100 {
            vec![(0, 10), (1, 24), (2, 12), (4, 14), (5, 10), (6, 16), (9, 12), (11, 9)]
        } else {
            // Compact: date | company | price | score | type
            vec![(0, 10), (1, width.saturating_sub(50).max(12)), (5, 10), (9, 5), (11, 9)]
        };
        Self { columns }
    }

    fn header(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|&(idx, w)| {
                let title = COLUMNS[idx].replace('_', " ").to_uppercase();
                format!("{:<w$}", truncate(&title, w), w = w)
            })
            .collect();
        format!("{}\n", cells.join("  ").trim_end())
    }

    fn row(&self, record: &ClientRecord) -> String {
        let values = record.display_cells();
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|&(idx, w)| format!("{:<w$}", truncate(&values[idx], w), w = w))
            .collect();
        format!("{}\n", cells.join("  ").trim_end())
    }
}
