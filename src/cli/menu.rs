//! Main menu for rentalcrm
//!
//! One menu run is one session: the record table is loaded once and the
//! filter criteria persist between screens.

use anyhow::{anyhow, Result};
use inquire::{Select, Text};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::cli::dashboard::render_dashboard;
use crate::cli::export::write_export;
use crate::cli::filter::{describe, prompt_criteria};
use crate::cli::list::render_list;
use crate::cli::ui::{clear_screen, error, minimal_render_config, term_width};
use crate::cli::{run_add, AddArgs};
use crate::export::export_filename;
use crate::filter::FilterCriteria;
use crate::models::today;
use crate::store::RecordStore;

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Dashboard,
    Add,
    Filter,
    ResetFilter,
    List,
    Export,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Dashboard,
        MenuOption::Add,
        MenuOption::Filter,
        MenuOption::ResetFilter,
        MenuOption::List,
        MenuOption::Export,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Dashboard => "Dashboard",
            MenuOption::Add => "Add client",
            MenuOption::Filter => "Filter",
            MenuOption::ResetFilter => "Reset filter",
            MenuOption::List => "List",
            MenuOption::Export => "Export to Excel",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// State carried between menu screens.
struct Session {
    store: RecordStore,
    /// None means "table defaults", recomputed on each render so new prices
    /// widen the range.
    criteria: Option<FilterCriteria>,
    export_dir: PathBuf,
}

impl Session {
    fn criteria(&self) -> FilterCriteria {
        self.criteria
            .clone()
            .unwrap_or_else(|| FilterCriteria::defaults_for(self.store.table()))
    }
}

/// Run the interactive main menu
pub fn run_menu(store: RecordStore, export_dir: PathBuf) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            rentalcrm add --company ... --tax-id ... --contact ...\n  \
            rentalcrm dashboard\n  \
            rentalcrm list\n  \
            rentalcrm export\n  \
            Run 'rentalcrm --help' for all options."
        ));
    }

    let mut session = Session {
        store,
        criteria: None,
        export_dir,
    };
    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        // Clear screen - if this fails, continue anyway (degraded but functional)
        let _ = clear_screen();

        let title = match session.criteria {
            Some(ref c) => format!("rentalcrm  [{}]", describe(c)),
            None => "rentalcrm".to_string(),
        };
        let selection = Select::new(&title, menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Ctrl+C or terminal trouble: exit quietly
        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };
        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };
        if choice == MenuOption::Quit {
            return Ok(());
        }

        let _ = clear_screen();

        // Errors are scoped to the action; the session keeps going
        if let Err(e) = execute_command(&mut session, choice) {
            error(&e.to_string());
        }
        wait_for_continue();
    }
}

fn execute_command(session: &mut Session, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::Dashboard => {
            print!("{}", render_dashboard(&session.store, &session.criteria()));
        }
        MenuOption::Add => {
            run_add(&mut session.store, AddArgs::default())?;
        }
        MenuOption::Filter => {
            let current = session.criteria();
            if let Some(criteria) = prompt_criteria(session.store.table(), &current)? {
                println!("\nFilter: {}", describe(&criteria));
                session.criteria = Some(criteria);
            }
        }
        MenuOption::ResetFilter => {
            session.criteria = None;
            println!("Filter cleared.");
        }
        MenuOption::List => {
            print!("{}", render_list(&session.store, &session.criteria(), term_width()));
        }
        MenuOption::Export => {
            let target = session.export_dir.join(export_filename(today()));
            let rows = write_export(&session.store, &session.criteria(), &target)?;
            println!("Exported {} rows to {}", rows, target.display());
        }
        MenuOption::Quit => {}
    }
    Ok(())
}

/// Wait for user to press enter to continue
fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}
