mod categories;
mod categorizer;
mod cli;
mod error;
mod export;
mod fmt;
mod ingest;
mod ledger;
mod models;
mod reports;
mod sample;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, TxCommands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FINHUB_LOG").unwrap_or_else(|_| EnvFilter::new("finhub=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, endpoint } => cli::init::run(data_dir, endpoint),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
        Commands::Tx { command } => match command {
            TxCommands::List {
                search,
                category,
                kind,
                limit,
            } => cli::transactions::list(search, category, kind, limit),
            TxCommands::Add {
                date,
                description,
                amount,
                category,
                kind,
                merchant,
                notes,
            } => cli::transactions::add(date, &description, amount, &category, kind, merchant, notes),
            TxCommands::Edit {
                id,
                date,
                description,
                amount,
                category,
                kind,
                merchant,
            } => cli::transactions::edit(&id, date, description, amount, category, kind, merchant),
            TxCommands::Delete { id } => cli::transactions::delete(&id),
        },
        Commands::Categories => cli::categories::list(),
        Commands::Categorize => cli::categorize::run(),
        Commands::Report { filter, json } => cli::report::run(&filter, json),
        Commands::Export { filter, output } => cli::export::run(&filter, output),
        Commands::Upload { files } => cli::upload::run(&files),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
