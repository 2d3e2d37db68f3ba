//! Command-line front end: argument dispatch over the services.

pub mod commands;
pub mod output;
pub mod table;

use std::io::{self, Write};

use crate::config::Config;
use crate::core::ledger_manager::LedgerManager;
use crate::core::services::ServiceError;
use crate::core::time::Clock;
use crate::errors::ForecastError;
use crate::ledger::Ledger;

use output::MessageKind;

pub const USAGE: &str = "\
Usage: budget_forecast <command> [args]

Commands:
  forecast                                        balance timeline and summary
  summary                                         summary figures only
  add <name> <amount> <credit|debit> <YYYY-MM-DD> record a transaction
  remove <id>                                     delete a transaction
  clear                                           delete every transaction
  recurring add <name> <amount> <credit|debit> <day>
  recurring list
  recurring use <id>                              record the rule on the current date
  recurring remove <id>
  card add <name> <day>
  card list
  card pay <id> <amount>                          record a payment on the next due date
  card remove <id>
  settings show
  settings set <field> <value>                    starting-balance, current-date, end-date,
                                                  horizon, currency, date-format, language
  version
  help";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}\nRun `budget_forecast help` for usage.")]
    Usage(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type CliResult<T = ()> = Result<T, CliError>;

/// Everything a command needs: persistence, configuration and a clock.
pub struct App {
    manager: LedgerManager,
    config: Config,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(manager: LedgerManager, config: Config, clock: Box<dyn Clock>) -> Self {
        Self {
            manager,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    /// Loads the ledger, reporting dropped records on stderr.
    pub fn load(&self) -> CliResult<Ledger> {
        let report = self.manager.load()?;
        for warning in &report.warnings {
            eprintln!("{}", output::message(MessageKind::Warning, warning));
        }
        Ok(report.ledger)
    }
}

/// Runs one command. `args` excludes the program name.
pub fn run<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Usage("missing command".into()));
    };

    match command.as_str() {
        "forecast" => commands::forecast(app, out),
        "summary" => commands::summary(app, out),
        "add" => commands::add_transaction(app, rest, out),
        "remove" => commands::remove_transaction(app, rest, out),
        "clear" => commands::clear_transactions(app, out),
        "recurring" => commands::recurring(app, rest, out),
        "card" => commands::card(app, rest, out),
        "settings" => commands::settings(app, rest, out),
        "version" => {
            writeln!(out, "{}", crate::utils::build_info::current().summary())?;
            Ok(())
        }
        "help" | "--help" | "-h" => {
            writeln!(out, "{USAGE}")?;
            Ok(())
        }
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}
