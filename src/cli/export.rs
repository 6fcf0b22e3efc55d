use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::ExportArgs;
use crate::error::{CrmError, ExportError};
use crate::export::{export_filename, export_view, XLSX_MIME};
use crate::filter::FilterCriteria;
use crate::models::today;
use crate::store::{sort_by_date_desc, RecordStore};

/// Execute the export command
pub fn run_export(store: &RecordStore, args: &ExportArgs, export_dir: &Path) -> Result<()> {
    let criteria = args.filters.criteria(store.table());
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| export_dir.join(export_filename(today())));

    let rows = write_export(store, &criteria, &target)?;
    println!("Exported {} rows to {}", rows, target.display());
    Ok(())
}

/// Filter, sort newest first, render and write the workbook. Returns the row count.
pub fn write_export(store: &RecordStore, criteria: &FilterCriteria, target: &Path) -> Result<usize, CrmError> {
    let mut view = criteria.apply(store.table());
    sort_by_date_desc(&mut view);

    let bytes = export_view(&view)?;
    fs::write(target, &bytes).map_err(|source| ExportError::Write {
        path: PathBuf::from(target),
        source,
    })?;

    info!(
        path = %target.display(),
        mime = XLSX_MIME,
        rows = view.len(),
        bytes = bytes.len(),
        "export written"
    );
    Ok(view.len())
}
