use clap::Parser;
use rentalcrm::cli::{run_add, run_dashboard, run_export, run_list, run_menu, Cli, Commands};
use rentalcrm::config::Config;
use rentalcrm::logging::{init_logging, Verbosity};
use rentalcrm::store::{CsvStorage, RecordStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let config = Config::load()?.with_data_file(cli.data_file);
    let mut store = RecordStore::open(CsvStorage::new(&config.data_file))?;

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(store, config.export_dir)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&mut store, args)?;
        }
        Some(Commands::Dashboard(args)) => {
            run_dashboard(&store, &args)?;
        }
        Some(Commands::List(args)) => {
            run_list(&store, &args)?;
        }
        Some(Commands::Export(args)) => {
            run_export(&store, &args, &config.export_dir)?;
        }
    }

    Ok(())
}
