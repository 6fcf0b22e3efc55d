use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::ui::parse_amount;
use crate::filter::{FilterCriteria, PriceRange};
use crate::models::{ClientType, DriverOption};
use crate::store::RecordTable;

pub mod add;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod list;
pub mod menu;
pub mod ui;

pub use add::run_add;
pub use dashboard::run_dashboard;
pub use export::run_export;
pub use list::run_list;
pub use menu::run_menu;

#[derive(Parser)]
#[command(name = "rentalcrm")]
#[command(about = "Client records and dashboard for a vehicle rental business")]
#[command(version)]
pub struct Cli {
    /// CSV data file (overrides RENTALCRM_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// More log output on stderr (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new client service
    Add(AddArgs),
    /// Summary metrics and charts
    Dashboard(DashboardArgs),
    /// Full data table, newest service first
    List(ListArgs),
    /// Write the filtered table to an .xlsx file
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Service date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,
    #[arg(long)]
    pub company: Option<String>,
    /// Tax id (RUC)
    #[arg(long)]
    pub tax_id: Option<String>,
    /// Service length in days
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,
    /// with_driver or without_driver, defaults to with_driver
    #[arg(long, value_parser = parse_driver_option)]
    pub driver: Option<DriverOption>,
    #[arg(long, value_parser = parse_amount)]
    pub price: Option<f64>,
    /// Contact name
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Credit score, 0-1000
    #[arg(long, value_parser = clap::value_parser!(u16).range(0..=1000))]
    pub score: Option<u16>,
    /// Number of workers
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,
    /// Client type: new or returning
    #[arg(short = 't', long = "type", value_parser = parse_client_type)]
    pub client_type: Option<ClientType>,
}

impl AddArgs {
    /// True when no field was given, which switches `add` to the interactive form.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.company.is_none()
            && self.tax_id.is_none()
            && self.days.is_none()
            && self.driver.is_none()
            && self.price.is_none()
            && self.contact.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.score.is_none()
            && self.workers.is_none()
            && self.client_type.is_none()
    }
}

/// View filters shared by dashboard, list and export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Client types to include (repeatable), default all
    #[arg(short = 't', long = "type", value_name = "TYPE", value_parser = parse_client_type)]
    pub client_types: Vec<ClientType>,
    /// Minimum credit score
    #[arg(long, value_parser = clap::value_parser!(u16).range(0..=1000))]
    pub min_score: Option<u16>,
    #[arg(long, value_parser = parse_amount)]
    pub min_price: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    pub max_price: Option<f64>,
}

impl FilterArgs {
    /// Table defaults with any given flags applied on top.
    pub fn criteria(&self, table: &RecordTable) -> FilterCriteria {
        let mut criteria = FilterCriteria::defaults_for(table);
        if !self.client_types.is_empty() {
            criteria.client_types = self.client_types.iter().copied().collect();
        }
        if let Some(score) = self.min_score {
            criteria.min_score = score;
        }
        criteria.price_range = PriceRange::new(
            self.min_price.unwrap_or(criteria.price_range.low),
            self.max_price.unwrap_or(criteria.price_range.high),
        );
        criteria
    }
}

#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Output file, defaults to clients_<date>.xlsx in the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_client_type(s: &str) -> Result<ClientType, String> {
    ClientType::parse(s).ok_or_else(|| format!("unknown client type '{}' (new, returning)", s))
}

fn parse_driver_option(s: &str) -> Result<DriverOption, String> {
    DriverOption::parse(s)
        .ok_or_else(|| format!("unknown driver option '{}' (with_driver, without_driver)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::parse_from([
            "rentalcrm", "list", "--type", "returning", "--min-score", "300", "--max-price", "900",
        ]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.filters.client_types, vec![ClientType::Returning]);
        assert_eq!(args.filters.min_score, Some(300));
        assert_eq!(args.filters.max_price, Some(900.0));
    }

    #[test]
    fn test_score_above_range_is_rejected() {
        let result = Cli::try_parse_from(["rentalcrm", "add", "--score", "1001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_price_flags_are_rejected() {
        for flag in ["--min-price", "--max-price"] {
            assert!(Cli::try_parse_from(["rentalcrm", "list", flag, "NaN"]).is_err());
            assert!(Cli::try_parse_from(["rentalcrm", "list", flag, "inf"]).is_err());
        }
        assert!(Cli::try_parse_from(["rentalcrm", "add", "--price", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["rentalcrm", "list", "--min-price", "12.5"]).is_ok());
    }

    #[test]
    fn test_parse_driver_flag() {
        let cli = Cli::parse_from(["rentalcrm", "add", "--driver", "without driver"]);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.driver, Some(DriverOption::WithoutDriver));
        assert!(!args.is_empty());

        assert!(Cli::try_parse_from(["rentalcrm", "add", "--driver", "maybe"]).is_err());
    }

    #[test]
    fn test_add_args_empty_detection() {
        assert!(AddArgs::default().is_empty());
        let cli = Cli::parse_from(["rentalcrm", "add", "--company", "Acme"]);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert!(!args.is_empty());
    }

    #[test]
    fn test_global_data_file_after_subcommand() {
        let cli = Cli::parse_from(["rentalcrm", "dashboard", "--data-file", "x.csv", "--json"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("x.csv")));
    }

    #[test]
    fn test_filter_args_override_defaults() {
        let table = RecordTable::new();
        let args = FilterArgs {
            client_types: vec![ClientType::New],
            min_score: Some(250),
            min_price: Some(10.0),
            max_price: None,
        };
        let criteria = args.criteria(&table);

        assert_eq!(criteria.client_types.len(), 1);
        assert_eq!(criteria.min_score, 250);
        assert_eq!(criteria.price_range, PriceRange::new(10.0, 100.0));
    }

    #[test]
    fn test_filter_args_default_matches_table_defaults() {
        let table = RecordTable::new();
        assert_eq!(
            FilterArgs::default().criteria(&table),
            FilterCriteria::defaults_for(&table)
        );
    }
}
