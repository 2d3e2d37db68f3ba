use std::{env, io, process};

use budget_forecast::{
    cli::{self, App, CliError},
    config::ConfigManager,
    core::{ledger_manager::LedgerManager, time::SystemClock, utils::app_home_dir},
    init_with_filter,
    storage::JsonStorage,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config_manager = ConfigManager::with_home(app_home_dir())?;
    let config = config_manager.load()?;
    init_with_filter(config.log_filter.as_deref());

    let storage = JsonStorage::new(config_manager.data_dir(&config))?;
    storage.initialize()?;
    let app = App::new(
        LedgerManager::new(Box::new(storage)),
        config,
        Box::new(SystemClock),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&app, &args, &mut out)
}
