use anyhow::Result;

use crate::cli::ui::{prompt_amount, prompt_select, prompt_text, prompt_typed};
use crate::cli::AddArgs;
use crate::intake::{submit, RecordDraft};
use crate::models::{today, ClientType, DriverOption, MAX_CREDIT_SCORE};
use crate::store::RecordStore;

/// Execute the add command
pub fn run_add(store: &mut RecordStore, args: AddArgs) -> Result<()> {
    // No fields given: run the interactive form
    let draft = if args.is_empty() {
        match interactive_form()? {
            Some(draft) => draft,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    } else {
        draft_from_args(args)
    };

    let stored = submit(store, draft)?;
    println!("\nRegistered: {} ({})", stored.company, stored.tax_id);
    println!("Saved to {}.", store.location());
    Ok(())
}

fn draft_from_args(args: AddArgs) -> RecordDraft {
    let defaults = RecordDraft::new();
    RecordDraft {
        service_date: args.date.unwrap_or(defaults.service_date),
        company: args.company.unwrap_or_default(),
        tax_id: args.tax_id.unwrap_or_default(),
        duration_days: args.days.unwrap_or(defaults.duration_days),
        has_driver: args.driver.unwrap_or(defaults.has_driver),
        price: args.price.unwrap_or(defaults.price),
        contact_name: args.contact.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        credit_score: args.score.unwrap_or(defaults.credit_score),
        worker_count: args.workers.unwrap_or(defaults.worker_count),
        client_type: args.client_type.unwrap_or(defaults.client_type),
    }
}

/// Walk through every field. Returns None if the user cancels.
fn interactive_form() -> Result<Option<RecordDraft>> {
    let defaults = RecordDraft::new();

    println!("Service");
    let Some(service_date) = prompt_typed("service date", today(), "use YYYY-MM-DD")?.ok() else {
        return Ok(None);
    };
    let Some(company) = prompt_text("company")?.ok() else {
        return Ok(None);
    };
    let Some(tax_id) = prompt_text("tax id")?.ok() else {
        return Ok(None);
    };
    let Some(duration_days) = prompt_positive("days")? else {
        return Ok(None);
    };
    let Some(price) = prompt_amount("price ($)", defaults.price)?.ok() else {
        return Ok(None);
    };
    let Some(has_driver) = prompt_select("driver", &DriverOption::ALL)?.ok() else {
        return Ok(None);
    };

    println!("\nContact");
    let Some(contact_name) = prompt_text("contact name")?.ok() else {
        return Ok(None);
    };
    let Some(email) = prompt_text("email")?.ok() else {
        return Ok(None);
    };
    let Some(phone) = prompt_text("phone")?.ok() else {
        return Ok(None);
    };

    println!("\nEvaluation");
    let Some(score) = prompt_typed("credit score (0-1000)", defaults.credit_score, "enter 0-1000")?.ok()
    else {
        return Ok(None);
    };
    let Some(worker_count) = prompt_positive("workers")? else {
        return Ok(None);
    };
    let Some(client_type) = prompt_select("client type", &ClientType::ALL)?.ok() else {
        return Ok(None);
    };

    Ok(Some(RecordDraft {
        service_date,
        company,
        tax_id,
        duration_days,
        has_driver,
        price,
        contact_name,
        email,
        phone,
        credit_score: score.min(MAX_CREDIT_SCORE),
        worker_count,
        client_type,
    }))
}

/// Ask until the answer is at least 1.
fn prompt_positive(field: &str) -> Result<Option<u32>> {
    loop {
        match prompt_typed(field, 1u32, "enter a whole number")?.ok() {
            None => return Ok(None),
            Some(0) => println!("{} must be at least 1", field),
            Some(n) => return Ok(Some(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CrmError, ValidationError};
    use chrono::NaiveDate;

    fn full_args() -> AddArgs {
        AddArgs {
            date: NaiveDate::from_ymd_opt(2024, 4, 2),
            company: Some("Pesquera Norte".to_string()),
            tax_id: Some("20444444444".to_string()),
            days: Some(5),
            driver: Some(DriverOption::WithoutDriver),
            price: Some(640.0),
            contact: Some("Elena Ruiz".to_string()),
            email: Some("elena@pnorte.pe".to_string()),
            phone: Some("01 555 0101".to_string()),
            score: Some(905),
            workers: Some(30),
            client_type: Some(ClientType::Returning),
        }
    }

    #[test]
    fn test_add_direct() {
        let mut store = RecordStore::open_memory();

        run_add(&mut store, full_args()).unwrap();

        let table = store.table();
        assert_eq!(table.len(), 1);
        let record = table.last().unwrap();
        assert_eq!(record.company, "Pesquera Norte");
        assert_eq!(record.has_driver, DriverOption::WithoutDriver);
        assert_eq!(record.credit_score, 905);
        assert_eq!(record.client_type, ClientType::Returning);
        assert_eq!(record.phone.as_deref(), Some("01 555 0101"));
    }

    #[test]
    fn test_add_uses_defaults_for_unset_fields() {
        let mut store = RecordStore::open_memory();
        let args = AddArgs {
            company: Some("Acme".to_string()),
            tax_id: Some("1".to_string()),
            contact: Some("Ana".to_string()),
            ..AddArgs::default()
        };

        run_add(&mut store, args).unwrap();

        let record = store.table().last().unwrap();
        assert_eq!(record.service_date, today());
        assert_eq!(record.duration_days, 1);
        assert_eq!(record.worker_count, 1);
        assert_eq!(record.has_driver, DriverOption::WithDriver);
        assert_eq!(record.client_type, ClientType::New);
        assert!(record.email.is_none());
    }

    #[test]
    fn test_add_requires_company() {
        let mut store = RecordStore::open_memory();
        let mut args = full_args();
        args.company = None;

        let err = run_add(&mut store, args).unwrap_err();

        let crm = err.downcast_ref::<CrmError>().unwrap();
        assert!(matches!(crm, CrmError::Validation(ValidationError::MissingFields(_))));
        assert!(store.table().is_empty());
    }
}
