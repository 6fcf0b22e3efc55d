//! Intake form handling: validate a candidate record, then append and flush.
//!
//! There is no duplicate detection and no normalization of tax ids or email
//! addresses. The same tax id may be recorded any number of times.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{Result, ValidationError};
use crate::models::{today, ClientRecord, ClientType, DriverOption, MAX_CREDIT_SCORE};
use crate::store::RecordStore;

/// A candidate record as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub service_date: NaiveDate,
    pub company: String,
    pub tax_id: String,
    pub duration_days: u32,
    pub has_driver: DriverOption,
    pub price: f64,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub credit_score: u16,
    pub worker_count: u32,
    pub client_type: ClientType,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            service_date: today(),
            company: String::new(),
            tax_id: String::new(),
            duration_days: 1,
            has_driver: DriverOption::default(),
            price: 0.0,
            contact_name: String::new(),
            email: String::new(),
            phone: String::new(),
            credit_score: 500,
            worker_count: 1,
            client_type: ClientType::default(),
        }
    }
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the required fields and numeric ranges.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("company", &self.company),
            ("tax_id", &self.tax_id),
            ("contact_name", &self.contact_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if self.duration_days < 1 {
            return Err(ValidationError::NotPositive { field: "duration_days" });
        }
        if self.worker_count < 1 {
            return Err(ValidationError::NotPositive { field: "worker_count" });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }

    /// Validate and build the record. The credit score is clamped to the
    /// form's 0..=1000 range.
    pub fn into_record(self) -> std::result::Result<ClientRecord, ValidationError> {
        self.validate()?;
        Ok(ClientRecord {
            service_date: self.service_date,
            company: self.company,
            tax_id: self.tax_id,
            duration_days: self.duration_days,
            has_driver: self.has_driver,
            price: self.price,
            contact_name: self.contact_name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            credit_score: self.credit_score.min(MAX_CREDIT_SCORE),
            worker_count: self.worker_count,
            client_type: self.client_type,
        })
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Submit a draft: validate, append to the session table, rewrite storage.
///
/// On a validation error nothing is appended. On a persistence error the
/// session table is left as it was.
pub fn submit(store: &mut RecordStore, draft: RecordDraft) -> Result<ClientRecord> {
    let record = match draft.into_record() {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "intake rejected");
            return Err(e.into());
        }
    };

    let stored = store.append_and_flush(record)?.clone();
    info!(
        company = %stored.company,
        client_type = stored.client_type.as_str(),
        records = store.table().len(),
        "client registered"
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrmError;
    use crate::store::{CsvStorage, RecordStorage};
    use tempfile::TempDir;

    fn filled() -> RecordDraft {
        RecordDraft {
            service_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            company: "Constructora Lima".to_string(),
            tax_id: "20555555555".to_string(),
            duration_days: 14,
            has_driver: DriverOption::WithDriver,
            price: 2100.0,
            contact_name: "Carlos Vega".to_string(),
            email: "carlos@clima.pe".to_string(),
            phone: "".to_string(),
            credit_score: 810,
            worker_count: 55,
            client_type: ClientType::New,
        }
    }

    #[test]
    fn test_default_draft_uses_today() {
        let draft = RecordDraft::new();
        assert_eq!(draft.service_date, today());
        assert_eq!(draft.duration_days, 1);
        assert_eq!(draft.worker_count, 1);
    }

    #[test]
    fn test_missing_company_is_rejected_without_append() {
        let mut store = RecordStore::open_memory();
        let mut draft = filled();
        draft.company = String::new();

        let err = submit(&mut store, draft).unwrap_err();

        assert!(matches!(
            err,
            CrmError::Validation(ValidationError::MissingFields(ref f)) if f == &vec!["company"]
        ));
        assert_eq!(store.table().len(), 0);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut draft = filled();
        draft.tax_id = "   ".to_string();
        draft.contact_name = "\t".to_string();

        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingFields(vec!["tax_id", "contact_name"]))
        );
    }

    #[test]
    fn test_range_checks() {
        let mut draft = filled();
        draft.duration_days = 0;
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NotPositive { field: "duration_days" })
        );

        let mut draft = filled();
        draft.worker_count = 0;
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NotPositive { field: "worker_count" })
        );

        let mut draft = filled();
        draft.price = -1.0;
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPrice));

        let mut draft = filled();
        draft.price = f64::NAN;
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_score_is_clamped() {
        let mut draft = filled();
        draft.credit_score = 4000;
        let record = draft.into_record().unwrap();
        assert_eq!(record.credit_score, 1000);
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let record = filled().into_record().unwrap();
        assert_eq!(record.email.as_deref(), Some("carlos@clima.pe"));
        assert!(record.phone.is_none());
    }

    #[test]
    fn test_duplicate_tax_id_is_accepted() {
        let mut store = RecordStore::open_memory();
        submit(&mut store, filled()).unwrap();
        submit(&mut store, filled()).unwrap();
        assert_eq!(store.table().len(), 2);
    }

    #[test]
    fn test_email_format_is_not_checked() {
        let mut store = RecordStore::open_memory();
        let mut draft = filled();
        draft.email = "not an email".to_string();
        let stored = submit(&mut store, draft).unwrap();
        assert_eq!(stored.email.as_deref(), Some("not an email"));
    }

    #[test]
    fn test_submit_then_reload_returns_candidate_last() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm_data.csv");

        let mut store = RecordStore::open(CsvStorage::new(&path)).unwrap();
        let mut first = filled();
        first.company = "Earlier SAC".to_string();
        submit(&mut store, first).unwrap();
        let stored = submit(&mut store, filled()).unwrap();

        let reloaded = CsvStorage::new(&path).load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.last(), Some(&stored));
        assert_eq!(
            reloaded.last().unwrap().service_date,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
    }
}
