//! Interactive filter editing for the menu session.

use anyhow::Result;
use inquire::{InquireError, MultiSelect};

use crate::cli::ui::{format_money, minimal_render_config, prompt_amount, prompt_typed};
use crate::filter::{price_bounds, FilterCriteria, PriceRange};
use crate::models::{ClientType, MAX_CREDIT_SCORE};
use crate::store::RecordTable;

/// Ask for client types, minimum score and price range.
///
/// Returns None if the user cancels; the caller keeps its current criteria.
pub fn prompt_criteria(table: &RecordTable, current: &FilterCriteria) -> Result<Option<FilterCriteria>> {
    let bounds = price_bounds(table);

    let defaults: Vec<usize> = ClientType::ALL
        .iter()
        .enumerate()
        .filter(|(_, t)| current.client_types.contains(*t))
        .map(|(i, _)| i)
        .collect();
    let types = MultiSelect::new("client types:", ClientType::ALL.to_vec())
        .with_default(&defaults)
        .with_render_config(minimal_render_config())
        .prompt();
    let client_types = match types {
        Ok(t) => t,
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            return Ok(None)
        }
        Err(e) => return Err(e.into()),
    };

    let Some(min_score) = prompt_typed("minimum score (0-1000)", current.min_score, "enter 0-1000")?.ok()
    else {
        return Ok(None);
    };

    println!(
        "price range available: {} - {}",
        format_money(bounds.low),
        format_money(bounds.high)
    );
    let current_range = current.price_range.clamped_to(&bounds);
    let Some(low) = prompt_amount("minimum price", current_range.low)?.ok() else {
        return Ok(None);
    };
    let Some(high) = prompt_amount("maximum price", current_range.high)?.ok() else {
        return Ok(None);
    };

    Ok(Some(FilterCriteria {
        client_types: client_types.into_iter().collect(),
        min_score: min_score.min(MAX_CREDIT_SCORE),
        price_range: PriceRange::new(low, high).clamped_to(&bounds),
    }))
}

/// One-line description of active criteria, for the menu header.
pub fn describe(criteria: &FilterCriteria) -> String {
    let types: Vec<&str> = criteria.client_types.iter().map(ClientType::as_str).collect();
    let types = if types.is_empty() {
        "none".to_string()
    } else {
        types.join("+")
    };
    format!(
        "types {}  score >= {}  price {} - {}",
        types,
        criteria.min_score,
        format_money(criteria.price_range.low),
        format_money(criteria.price_range.high)
    )
}
