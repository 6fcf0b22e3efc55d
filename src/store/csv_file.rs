use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::{RecordStorage, RecordTable};
use crate::error::{PersistenceError, Result};
use crate::models::{ClientRecord, COLUMNS};

/// Flat CSV file with the fixed 12-column header and no index column.
///
/// Every `persist` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_error(&self, source: csv::Error) -> PersistenceError {
        PersistenceError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStorage for CsvStorage {
    fn load(&self) -> Result<RecordTable> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(RecordTable::new());
            }
            Err(e) => return Err(self.read_error(e.into()).into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers().map_err(|e| self.read_error(e))?;
        if !headers.iter().eq(COLUMNS.iter().copied()) {
            return Err(PersistenceError::Schema {
                path: self.path.clone(),
                found: headers.iter().map(str::to_string).collect(),
            }
            .into());
        }

        let records = reader
            .deserialize::<ClientRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.read_error(e))?;

        Ok(RecordTable::from_records(records))
    }

    fn persist(&self, table: &RecordTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e.into()))?;
            }
        }

        // Header is written by hand so an empty table still carries the schema.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| self.write_error(e))?;
        writer
            .write_record(COLUMNS)
            .map_err(|e| self.write_error(e))?;
        for record in table {
            writer.serialize(record).map_err(|e| self.write_error(e))?;
        }
        writer
            .flush()
            .map_err(|e| self.write_error(e.into()))?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrmError;
    use crate::models::{ClientType, DriverOption};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(company: &str, email: Option<&str>) -> ClientRecord {
        ClientRecord {
            service_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            company: company.to_string(),
            tax_id: "20600000001".to_string(),
            duration_days: 30,
            has_driver: DriverOption::WithDriver,
            price: 3499.99,
            contact_name: "Jorge Ramos".to_string(),
            email: email.map(str::to_string),
            phone: Some("+51 999 888 777".to_string()),
            credit_score: 1000,
            worker_count: 120,
            client_type: ClientType::Returning,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = CsvStorage::new(dir.path().join("crm_data.csv"));

        let table = storage.load().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let dir = TempDir::new().unwrap();
        let storage = CsvStorage::new(dir.path().join("crm_data.csv"));
        let table = RecordTable::new()
            .append(record("Transportes \"El Sol\", SRL", Some("ops@elsol.pe")))
            .append(record("Agro Norte", None));

        storage.persist(&table).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm_data.csv");
        let storage = CsvStorage::new(&path);

        storage.persist(&RecordTable::new()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), COLUMNS.join(","));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let storage = CsvStorage::new(dir.path().join("crm_data.csv"));
        let two = RecordTable::new()
            .append(record("A", None))
            .append(record("B", None));
        storage.persist(&two).unwrap();

        let one = RecordTable::new().append(record("C", None));
        storage.persist(&one).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records()[0].company, "C");
    }

    #[test]
    fn test_persist_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("crm_data.csv");
        let storage = CsvStorage::new(&path);

        storage.persist(&RecordTable::new().append(record("A", None))).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_rejects_foreign_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm_data.csv");
        fs::write(&path, "Empresa,RUC,Precio\nAcme,1,10\n").unwrap();

        let err = CsvStorage::new(&path).load().unwrap_err();
        match err {
            CrmError::Persistence(PersistenceError::Schema { found, .. }) => {
                assert_eq!(found, vec!["Empresa", "RUC", "Precio"]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_reports_bad_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm_data.csv");
        let body = format!(
            "{}\n2024-01-01,Acme,1,not-a-number,with_driver,10.0,Ana,,,5,1,new\n",
            COLUMNS.join(",")
        );
        fs::write(&path, body).unwrap();

        let err = CsvStorage::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            CrmError::Persistence(PersistenceError::Read { .. })
        ));
    }

    #[test]
    fn test_persist_into_directory_path_fails() {
        let dir = TempDir::new().unwrap();
        let storage = CsvStorage::new(dir.path());

        let err = storage.persist(&RecordTable::new()).unwrap_err();
        assert!(matches!(
            err,
            CrmError::Persistence(PersistenceError::Write { .. })
        ));
    }
}
