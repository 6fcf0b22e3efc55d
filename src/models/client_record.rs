use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Highest credit score the intake form accepts.
pub const MAX_CREDIT_SCORE: u16 = 1000;

/// Persisted column order. The CSV header and the export header both use it.
pub const COLUMNS: [&str; 12] = [
    "service_date",
    "company",
    "tax_id",
    "duration_days",
    "has_driver",
    "price",
    "contact_name",
    "email",
    "phone",
    "credit_score",
    "worker_count",
    "client_type",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriverOption {
    #[default]
    WithDriver,
    WithoutDriver,
}

impl DriverOption {
    pub const ALL: [DriverOption; 2] = [Self::WithDriver, Self::WithoutDriver];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithDriver => "with_driver",
            Self::WithoutDriver => "without_driver",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WithDriver => "with driver",
            Self::WithoutDriver => "without driver",
        }
    }

    /// Accepts the stored name or the display label.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "with_driver" | "driver" | "yes" => Some(Self::WithDriver),
            "without_driver" | "no_driver" | "no" => Some(Self::WithoutDriver),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    #[default]
    New,
    Returning,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [Self::New, Self::Returning];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Returning => "returning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "returning" | "existing" => Some(Self::Returning),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for DriverOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One rental service transaction.
///
/// Field order matches [`COLUMNS`]; serde uses the field names as CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub service_date: NaiveDate,
    pub company: String,
    pub tax_id: String,
    pub duration_days: u32,
    pub has_driver: DriverOption,
    pub price: f64,
    pub contact_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,
    pub credit_score: u16,
    pub worker_count: u32,
    pub client_type: ClientType,
}

impl ClientRecord {
    /// Cell values in [`COLUMNS`] order, as shown in tables.
    pub fn display_cells(&self) -> [String; 12] {
        [
            self.service_date.format("%Y-%m-%d").to_string(),
            self.company.clone(),
            self.tax_id.clone(),
            self.duration_days.to_string(),
            self.has_driver.label().to_string(),
            format!("{:.2}", self.price),
            self.contact_name.clone(),
            self.email.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            self.credit_score.to_string(),
            self.worker_count.to_string(),
            self.client_type.as_str().to_string(),
        ]
    }
}

/// Today's date in the local timezone, the default service date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Deserialize empty strings as None.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
